pub mod config;
pub mod constants;
pub mod coords;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod types;

pub use crawler::{CrawlReport, Crawler, Diagnostic};
pub use error::{CrawlError, LinkError, Result};
pub use fetch::{HttpFetcher, PageFetcher};
pub use output::OutputWriter;
pub use types::{Coordinate, EventRecord, VenueRecord};
