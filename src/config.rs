use crate::constants::{DEFAULT_LISTING_PAGES, DEFAULT_OUTPUT_PATH};
use crate::error::{CrawlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listing pages, crawled and written out in this order
    pub listing_pages: Vec<String>,
    pub output_path: PathBuf,
    pub pretty: bool,
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_pages: DEFAULT_LISTING_PAGES.iter().map(|s| s.to_string()).collect(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pretty: true,
            user_agent: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CrawlError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Parses every listing page into an absolute URL.
    pub fn listing_urls(&self) -> Result<Vec<Url>> {
        self.listing_pages
            .iter()
            .map(|page| {
                let url = Url::parse(page.trim())
                    .map_err(|e| CrawlError::Config(format!("invalid listing page '{page}': {e}")))?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(CrawlError::Config(format!(
                        "listing page '{page}' must be http or https"
                    )));
                }
                Ok(url)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_cover_the_five_theatre_pages() {
        let config = Config::default();
        assert_eq!(config.listing_pages.len(), 5);
        assert_eq!(config.listing_pages[0], "http://www.milanodabere.it/milano/teatri");
        assert_eq!(config.output_path, PathBuf::from("venues.json"));
        assert!(config.pretty);
        assert_eq!(config.listing_urls().unwrap().len(), 5);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = Config::from_toml(
            r#"
            listing_pages = ["https://example.org/teatri", "https://example.org/teatri/2"]
            pretty = false
            "#,
        )
        .unwrap();

        assert_eq!(config.listing_pages.len(), 2);
        assert!(!config.pretty);
        assert_eq!(config.output_path, PathBuf::from("venues.json"));
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crawler.toml");
        fs::write(
            &path,
            "output_path = \"out/map.json\"\nuser_agent = \"venue-map/0.1\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/map.json"));
        assert_eq!(config.user_agent.as_deref(), Some("venue-map/0.1"));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CrawlError::Config(_)));
    }

    #[test]
    fn bad_toml_is_reported() {
        let err = Config::from_toml("listing_pages = 3").unwrap_err();
        assert!(matches!(err, CrawlError::Toml(_)));
    }

    #[test]
    fn relative_or_non_http_pages_are_rejected() {
        let mut config = Config::default();
        config.listing_pages = vec!["/milano/teatri".to_string()];
        assert!(matches!(config.listing_urls(), Err(CrawlError::Config(_))));

        config.listing_pages = vec!["ftp://example.org/teatri".to_string()];
        assert!(matches!(config.listing_urls(), Err(CrawlError::Config(_))));
    }
}
