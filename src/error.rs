use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("malformed map link {link:?} for venue {venue:?}: {reason}")]
    MalformedLink {
        link: String,
        venue: String,
        #[source]
        reason: LinkError,
    },

    #[error("missing required field {field} in {context}")]
    MissingField { field: &'static str, context: String },

    #[error("event {title:?} ends ({ends}) before it starts ({starts})")]
    InvalidDateRange {
        title: String,
        starts: String,
        ends: String,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CrawlError {
    pub fn network<E>(url: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CrawlError::Network {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// Why a map link could not be turned into a coordinate pair.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkError {
    #[error("link is missing")]
    Absent,

    #[error("no query string")]
    MissingQuery,

    #[error("expected at least 2 query parameters, found {0}")]
    TooFewParams(usize),

    #[error("parameter {0:?} has no value")]
    MissingValue(String),

    #[error("parameter value {value:?} is not a number")]
    InvalidNumber { value: String },

    #[error("parameter value {0:?} is not finite")]
    NonFinite(String),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
