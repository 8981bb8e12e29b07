use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use venue_map_crawler::config::Config;
use venue_map_crawler::coords::decode_map_link;
use venue_map_crawler::logging;
use venue_map_crawler::{Crawler, HttpFetcher, OutputWriter};

#[derive(Parser)]
#[command(name = "venue_map_crawler")]
#[command(about = "Crawls venue listings and writes venues.json for the map")]
#[command(version = "0.1.0")]
struct Cli {
    /// Also write JSON logs, rotated daily, into this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl every listing page and write the venues document
    Crawl {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output path (overrides the configuration)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write the document on a single line
        #[arg(long)]
        compact: bool,
        /// Listing page to crawl; repeat to crawl several (overrides the configuration)
        #[arg(long = "page")]
        pages: Vec<String>,
    },
    /// Decode the coordinates from a map link
    Decode {
        link: String,
    },
}

async fn crawl(config: Config) -> anyhow::Result<()> {
    let pages = config.listing_urls()?;
    let fetcher = Arc::new(HttpFetcher::new(config.user_agent.as_deref())?);
    let writer = OutputWriter::new(&config.output_path).pretty(config.pretty);

    println!("📡 Crawling {} listing pages...", pages.len());
    let report = Crawler::new(fetcher, pages)
        .run(&writer)
        .await
        .context("crawl failed, nothing was written")?;

    if !report.diagnostics.is_empty() {
        warn!("{} records skipped during crawl", report.diagnostics.len());
        println!("\n⚠️  Skipped:");
        for diagnostic in &report.diagnostics {
            println!("   - {}", diagnostic);
        }
    }
    println!(
        "✅ {} venues were saved to {}!",
        report.venues.len(),
        writer.path().display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init_logging(cli.log_dir.as_deref());

    match cli.command {
        Commands::Crawl {
            config,
            output,
            compact,
            pages,
        } => {
            let mut cfg = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            if let Some(output) = output {
                cfg.output_path = output;
            }
            if compact {
                cfg.pretty = false;
            }
            if !pages.is_empty() {
                cfg.listing_pages = pages;
            }

            crawl(cfg).await?;
        }
        Commands::Decode { link } => {
            let coords = decode_map_link(&link).with_context(|| format!("cannot decode {link:?}"))?;
            println!("[{}, {}]", coords.lat, coords.lng);
        }
    }
    Ok(())
}
