//! In-memory page source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::PageSource;
use crate::error::{AppError, Result};

/// Serves fixed HTML by exact URL and records every render.
#[derive(Default)]
pub(crate) struct StaticSource {
    pages: HashMap<String, String>,
    fallback: Option<String>,
    calls: Mutex<Vec<(String, bool)>>,
}

impl StaticSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// HTML served for any URL without a page; unknown URLs fail otherwise.
    pub(crate) fn with_fallback(mut self, html: &str) -> Self {
        self.fallback = Some(html.to_string());
        self
    }

    /// Rendered URLs with their scroll flag, in call order.
    pub(crate) fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(url, _)| url).collect()
    }
}

#[async_trait]
impl PageSource for StaticSource {
    async fn render(&self, url: &str, scroll_to_bottom: bool) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), scroll_to_bottom));
        self.pages
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| AppError::browser(format!("no page for {url}")))
    }
}
