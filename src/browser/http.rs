// src/browser/http.rs

//! Plain HTTP page source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::PageSource;
use crate::error::Result;
use crate::models::BrowserConfig;

/// Fetches pages with a single GET; no scripts run, so lazy content is absent.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Create a configured asynchronous HTTP client.
    pub fn new(config: &BrowserConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn render(&self, url: &str, scroll_to_bottom: bool) -> Result<String> {
        if scroll_to_bottom {
            log::debug!("HTTP backend cannot scroll; fetching {url} as is");
        }
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
