use std::path::PathBuf;

pub const DEFAULT_CATALOG_URL: &str = "https://runrepeat.com/catalog/running-shoes";
pub const DEFAULT_SITE_ROOT: &str = "https://runrepeat.com/";
pub const DEFAULT_PAGE_COUNT: u32 = 20;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36";
pub const DEFAULT_CACHE_PATH: &str = "shoes.json";

/// Everything a run needs to know about where to crawl and where to keep results.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Listing page 1; later pages append `?page=N`.
    pub catalog_url: String,
    /// Base that product links on listing pages are resolved against.
    pub site_root: String,
    pub page_count: u32,
    pub user_agent: String,
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            site_root: DEFAULT_SITE_ROOT.to_string(),
            page_count: DEFAULT_PAGE_COUNT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
        }
    }
}

impl Config {
    /// Listing page URLs in crawl order: page 1 has no suffix.
    pub fn catalog_page_urls(&self) -> Vec<String> {
        (1..=self.page_count)
            .map(|page| match page {
                1 => self.catalog_url.clone(),
                n => format!("{}?page={}", self.catalog_url, n),
            })
            .collect()
    }
}
