// src/browser/chrome.rs

//! Headless Chrome page source.

use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};

use super::{PageSource, SCROLL_TO_BOTTOM};
use crate::error::{AppError, Result};
use crate::models::BrowserConfig;

/// Renders pages in headless Chrome.
///
/// A new browser process is launched for every page and dropped afterwards,
/// so no session state carries over between navigations.
#[derive(Debug, Clone)]
pub struct ChromeSource {
    user_agent: String,
    headless: bool,
    timeout: Duration,
    render_wait: Duration,
}

impl ChromeSource {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            headless: config.headless,
            timeout: Duration::from_secs(config.timeout_secs),
            render_wait: Duration::from_millis(config.render_wait_ms),
        }
    }

    fn launch(&self) -> Result<Browser> {
        let options = LaunchOptions::default_builder()
            .headless(self.headless)
            .idle_browser_timeout(self.timeout)
            .build()
            .map_err(AppError::browser)?;
        Browser::new(options).map_err(AppError::browser)
    }

    fn render_blocking(&self, url: &str, scroll_to_bottom: bool) -> Result<String> {
        let browser = self.launch()?;
        let tab = browser.new_tab().map_err(AppError::browser)?;
        tab.set_default_timeout(self.timeout);
        tab.set_user_agent(&self.user_agent, None, None)
            .map_err(AppError::browser)?;

        tab.navigate_to(url).map_err(AppError::browser)?;
        tab.wait_until_navigated().map_err(AppError::browser)?;

        if scroll_to_bottom {
            tab.evaluate(SCROLL_TO_BOTTOM, false)
                .map_err(AppError::browser)?;
            std::thread::sleep(self.render_wait);
        }

        tab.get_content().map_err(AppError::browser)
    }
}

#[async_trait]
impl PageSource for ChromeSource {
    async fn render(&self, url: &str, scroll_to_bottom: bool) -> Result<String> {
        let source = self.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || source.render_blocking(&url, scroll_to_bottom))
            .await
            .map_err(AppError::browser)?
    }
}
