use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::config::Config;
use crate::error::ScrapeError;

/// Source of raw page markup.
pub trait Fetch {
    fn fetch_html(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Blocking HTTP GET with a desktop browser User-Agent.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        // Block until the server answers or the connection fails.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|source| ScrapeError::Http {
                url: config.catalog_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let http_err = |source: reqwest::Error| ScrapeError::Http {
            url: url.to_string(),
            source,
        };

        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .map_err(http_err)?;

        let status = resp.status();
        debug!(%url, %status, "response");
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().map_err(http_err)
    }
}
