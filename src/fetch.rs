use crate::error::{CrawlError, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use std::time::Instant;
use tracing::debug;

/// Retrieves the raw markup behind a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
///
/// Transport failures and non-2xx statuses both come back as
/// [`CrawlError::Network`]. No retries, and no timeout beyond the client default.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua.to_string());
        }
        let client = builder
            .build()
            .map_err(|e| CrawlError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let started = Instant::now();
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CrawlError::network(url, e))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| CrawlError::network(url, e))?;

        histogram!("venue_crawler_fetch_duration_seconds").record(started.elapsed().as_secs_f64());
        counter!("venue_crawler_bytes_fetched_total").increment(body.len() as u64);
        debug!(url, status, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
