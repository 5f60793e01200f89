mod archiver;
mod config;
mod crawler;
mod dom;
mod error;
mod fetcher;
mod models;
mod parser;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::archiver::Cache;
use crate::config::{
    Config, DEFAULT_CACHE_PATH, DEFAULT_CATALOG_URL, DEFAULT_PAGE_COUNT, DEFAULT_SITE_ROOT,
    DEFAULT_USER_AGENT,
};
use crate::fetcher::HttpFetcher;

#[derive(Parser)]
#[command(
    name = "shoe_review_archiver",
    about = "Scrape running-shoe reviews into a local JSON cache"
)]
struct Cli {
    /// First listing page of the catalog
    #[arg(long, default_value = DEFAULT_CATALOG_URL)]
    catalog_url: String,
    /// Base URL that product links are resolved against
    #[arg(long, default_value = DEFAULT_SITE_ROOT)]
    site_root: String,
    /// Number of listing pages to walk
    #[arg(long, default_value_t = DEFAULT_PAGE_COUNT)]
    pages: u32,
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    /// JSON file holding previously scraped records
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    cache: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            catalog_url: cli.catalog_url,
            site_root: cli.site_root,
            page_count: cli.pages,
            user_agent: cli.user_agent,
            cache_path: cli.cache,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from(Cli::parse());
    run(&config)
}

fn run(config: &Config) -> Result<()> {
    let fetcher = HttpFetcher::new(config).context("building HTTP client")?;

    let urls = crawler::collect_detail_urls(&fetcher, config).context("crawling catalog")?;

    let mut cache = Cache::load(&config.cache_path).context("loading cache")?;
    if cache.is_empty() {
        info!("No cached records in {}, scraping everything", config.cache_path.display());
    } else {
        info!("Loaded {} cached records from {}", cache.len(), config.cache_path.display());
    }
    let stats = crawler::scrape_all(&fetcher, &urls, &mut cache).context("scraping detail pages")?;

    cache.save(&config.cache_path).context("saving cache")?;
    info!(
        "Done: {} URLs ({} scraped, {} from cache), {} records saved to {}",
        stats.total(),
        stats.scraped,
        stats.cached,
        cache.len(),
        config.cache_path.display()
    );
    Ok(())
}
