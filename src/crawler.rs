use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::archiver::Cache;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::fetcher::Fetch;
use crate::parser;

static PRODUCT_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-name").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Counts reported after a scrape pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeStats {
    pub scraped: usize,
    pub cached: usize,
}

impl ScrapeStats {
    pub fn total(&self) -> usize {
        self.scraped + self.cached
    }
}

/// Absolute detail-page URLs linked from one listing page, in page order.
pub fn parse_catalog_links(html: &str, site_root: &Url) -> Result<Vec<String>, ScrapeError> {
    let doc = Html::parse_document(html);
    let mut urls = Vec::new();

    for product in doc.select(&PRODUCT_NAME) {
        let Some(href) = product
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            debug!("product-name element without a link");
            continue;
        };

        let url = site_root
            .join(href.trim())
            .map_err(|source| ScrapeError::InvalidUrl {
                href: href.to_string(),
                source,
            })?;
        urls.push(url.to_string());
    }
    Ok(urls)
}

/// Walks every listing page in order and collects detail-page URLs.
/// Duplicates across pages are kept.
pub fn collect_detail_urls<F: Fetch>(
    fetcher: &F,
    config: &Config,
) -> Result<Vec<String>, ScrapeError> {
    let site_root = Url::parse(&config.site_root).map_err(|source| ScrapeError::InvalidUrl {
        href: config.site_root.clone(),
        source,
    })?;

    let mut urls = Vec::new();
    for page_url in config.catalog_page_urls() {
        info!("Fetching catalog page {page_url}");
        let html = fetcher.fetch_html(&page_url)?;
        let links = parse_catalog_links(&html, &site_root)?;
        debug!(page = %page_url, links = links.len());
        urls.extend(links);
    }

    info!("Collected {} detail page URLs", urls.len());
    Ok(urls)
}

/// Scrapes every URL not already in `cache`, one at a time. The first failure
/// aborts the pass; records added before it stay in `cache` but nothing is saved here.
pub fn scrape_all<F: Fetch>(
    fetcher: &F,
    urls: &[String],
    cache: &mut Cache,
) -> Result<ScrapeStats, ScrapeError> {
    let mut stats = ScrapeStats::default();

    for url in urls {
        if cache.contains(url) {
            info!("Loaded from cache: {url}");
            stats.cached += 1;
            continue;
        }

        let html = fetcher.fetch_html(url)?;
        let record = parser::parse_shoe(url, &html)?;
        cache.insert(record);
        info!("Scraped {url}");
        stats.scraped += 1;
    }

    Ok(stats)
}
