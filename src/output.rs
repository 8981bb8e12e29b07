use crate::error::{CrawlError, Result};
use crate::types::{Document, VenueRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Persists the crawl result as `{ "venues": [...] }` with a single write.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    path: PathBuf,
    pretty: bool,
}

impl OutputWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Two-space indented output (the default) or a single compact line.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, venues: &[VenueRecord]) -> Result<Vec<u8>> {
        let doc = Document { venues };
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&doc)?
        } else {
            serde_json::to_vec(&doc)?
        };
        Ok(bytes)
    }

    #[instrument(skip(self, venues), fields(path = %self.path.display(), venues = venues.len()))]
    pub fn write(&self, venues: &[VenueRecord]) -> Result<()> {
        let bytes = self.render(venues)?;
        fs::write(&self.path, &bytes).map_err(|source| CrawlError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(bytes = bytes.len(), "document written");
        Ok(())
    }
}
