//! Structural extraction of venues and events from listing markup.
//!
//! Extractors never fail a whole page: a card that cannot be read is skipped
//! and the reason is kept alongside the records that were read.

pub mod events;
pub mod venues;

pub use events::extract_events;
pub use venues::extract_venues;

use crate::error::CrawlError;
use scraper::{ElementRef, Selector};

/// Records read from one page plus the cards that had to be skipped.
#[derive(Debug)]
pub struct Extracted<T> {
    pub records: Vec<T>,
    pub skipped: Vec<CrawlError>,
}

impl<T> Default for Extracted<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e:?}"))
}

/// Whitespace-normalized text of the first element matching `sel`.
pub(crate) fn first_text(element: &ElementRef, sel: &Selector) -> Option<String> {
    element.select(sel).next().map(|el| {
        el.text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    })
}

pub(crate) fn first_attr<'a>(element: &ElementRef<'a>, sel: &Selector, attr: &str) -> Option<&'a str> {
    element.select(sel).find_map(|el| el.value().attr(attr))
}
