//! Page rendering backends.
//!
//! Every backend turns a URL into the HTML of the rendered page:
//! - `ChromeSource`: headless Chrome, a fresh browser per page (feature `chrome`)
//! - `HttpSource`: plain HTTP GET through `reqwest`

#[cfg(feature = "chrome")]
mod chrome;
mod http;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(not(feature = "chrome"))]
use crate::error::AppError;
use crate::error::Result;
use crate::models::{BrowserBackend, BrowserConfig};

#[cfg(feature = "chrome")]
pub use chrome::ChromeSource;
pub use http::HttpSource;

/// Script that forces lazy-loaded content to render.
pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// A backend that renders pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Navigate to `url` in a fresh session and return the rendered HTML.
    ///
    /// With `scroll_to_bottom` the page is scrolled to its end before the
    /// document is captured.
    async fn render(&self, url: &str, scroll_to_bottom: bool) -> Result<String>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn render(&self, url: &str, scroll_to_bottom: bool) -> Result<String> {
        (**self).render(url, scroll_to_bottom).await
    }
}

/// Build the backend selected in the configuration.
pub fn from_config(config: &BrowserConfig) -> Result<Box<dyn PageSource>> {
    match config.backend {
        #[cfg(feature = "chrome")]
        BrowserBackend::Chrome => Ok(Box::new(ChromeSource::new(config))),
        #[cfg(not(feature = "chrome"))]
        BrowserBackend::Chrome => Err(AppError::config(
            "browser.backend = \"chrome\" requires the `chrome` feature",
        )),
        BrowserBackend::Http => {
            log::debug!("Using plain HTTP backend; pages are not script-rendered");
            Ok(Box::new(HttpSource::new(config)?))
        }
    }
}
