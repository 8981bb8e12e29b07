//! Two-level fan-out over listing pages and venue events pages.
//!
//! Phase 1 fetches and extracts every listing page concurrently; the first
//! network failure aborts the run and drops the in-flight siblings. Phase 2
//! fetches each venue's events page concurrently; a failure there only leaves
//! that venue without events. Results are merged by origin index, so the
//! output order never depends on which response arrives first.

use crate::error::{CrawlError, Result};
use crate::extract::{extract_events, extract_venues, Extracted};
use crate::fetch::PageFetcher;
use crate::output::OutputWriter;
use crate::types::{EventRecord, VenueDraft, VenueRecord};
use futures::future::{join_all, try_join_all};
use metrics::counter;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// A recoverable problem, tied to the page it came from.
#[derive(Debug)]
pub struct Diagnostic {
    pub url: String,
    pub error: CrawlError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.url, self.error)
    }
}

/// Outcome of a completed crawl
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub venues: Vec<VenueRecord>,
    pub diagnostics: Vec<Diagnostic>,
    pub listing_pages: usize,
    pub event_pages: usize,
}

impl CrawlReport {
    pub fn event_count(&self) -> usize {
        self.venues.iter().map(|v| v.events.len()).sum()
    }
}

pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    listing_pages: Vec<Url>,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>, listing_pages: Vec<Url>) -> Self {
        Self {
            fetcher,
            listing_pages,
        }
    }

    /// Crawls everything, then writes the document exactly once.
    ///
    /// Nothing is written if the crawl fails.
    pub async fn run(&self, writer: &OutputWriter) -> Result<CrawlReport> {
        let report = self.crawl().await?;
        writer.write(&report.venues)?;
        info!(
            venues = report.venues.len(),
            events = report.event_count(),
            diagnostics = report.diagnostics.len(),
            path = %writer.path().display(),
            "crawl saved"
        );
        Ok(report)
    }

    #[instrument(skip(self), fields(pages = self.listing_pages.len()))]
    pub async fn crawl(&self) -> Result<CrawlReport> {
        let mut report = CrawlReport::default();

        // Phase 1: listing pages, fail-fast.
        info!("fetching listing pages");
        let pages = try_join_all(self.listing_pages.iter().map(|page| self.fetch_listing(page)))
            .await
            .map_err(|e| {
                error!(error = %e, "listing page failed, aborting run");
                e
            })?;
        report.listing_pages = pages.len();

        let mut drafts: Vec<VenueDraft> = Vec::new();
        for (page, extracted) in self.listing_pages.iter().zip(pages) {
            drafts.extend(extracted.records);
            report.diagnostics.extend(extracted.skipped.into_iter().map(|error| Diagnostic {
                url: page.to_string(),
                error,
            }));
        }
        counter!("venue_crawler_venues_extracted_total").increment(drafts.len() as u64);

        // Phase 2: events pages, isolated per venue.
        let with_events = drafts.iter().filter(|d| d.events_link.is_some()).count();
        info!(venues = drafts.len(), with_events, "fetching events pages");
        let events = join_all(drafts.iter().map(|draft| async move {
            match &draft.events_link {
                Some(url) => Some(self.fetch_events(url).await),
                None => None,
            }
        }))
        .await;

        for (draft, outcome) in drafts.into_iter().zip(events) {
            let url = draft.events_link.as_ref().map(Url::to_string).unwrap_or_default();
            let records = match outcome {
                None => Vec::new(),
                Some(Ok(extracted)) => {
                    report.event_pages += 1;
                    report.diagnostics.extend(extracted.skipped.into_iter().map(|error| Diagnostic {
                        url: url.clone(),
                        error,
                    }));
                    extracted.records
                }
                Some(Err(error)) => {
                    warn!(venue = %draft.name, %error, "events page failed, keeping venue without events");
                    report.diagnostics.push(Diagnostic { url, error });
                    Vec::new()
                }
            };
            report.venues.push(draft.into_record(records));
        }

        counter!("venue_crawler_events_extracted_total").increment(report.event_count() as u64);
        counter!("venue_crawler_diagnostics_total").increment(report.diagnostics.len() as u64);
        for diagnostic in &report.diagnostics {
            debug!(%diagnostic, "diagnostic");
        }
        Ok(report)
    }

    async fn fetch_listing(&self, page: &Url) -> Result<Extracted<VenueDraft>> {
        let markup = self.fetcher.fetch(page.as_str()).await?;
        counter!("venue_crawler_listing_pages_total").increment(1);
        Ok(extract_venues(&markup, page))
    }

    async fn fetch_events(&self, url: &Url) -> Result<Extracted<EventRecord>> {
        let markup = self.fetcher.fetch(url.as_str()).await?;
        counter!("venue_crawler_event_pages_total").increment(1);
        Ok(extract_events(&markup))
    }
}
