// src/services/fetcher.rs

//! Listing and detail page fetching.

use scraper::Html;
use url::Url;

use crate::browser::PageSource;
use crate::error::{AppError, Result};
use crate::models::{Config, SearchConfig};
use crate::utils::retry::RetryPolicy;

/// Fetches and parses pages through a `PageSource`, retrying transient
/// failures with exponential backoff.
pub struct PageFetcher {
    source: Box<dyn PageSource>,
    search: SearchConfig,
    retry: RetryPolicy,
}

impl PageFetcher {
    pub fn new(source: Box<dyn PageSource>, config: &Config) -> Self {
        Self {
            source,
            search: config.search.clone(),
            retry: RetryPolicy::from(&config.retry),
        }
    }

    /// Search URL of a listing page.
    pub fn listing_url(&self, page: u32) -> Result<Url> {
        listing_url(&self.search, page)
    }

    /// Fetch a listing page, scrolled to the bottom so every entry renders.
    pub async fn fetch_listing_page(&self, page: u32) -> Result<Html> {
        let url = self.listing_url(page)?;
        log::debug!("Fetching listing page {page}: {url}");
        let html = self.render(url.as_str(), true).await?;
        Ok(Html::parse_document(&html))
    }

    /// Fetch a single estate announcement page.
    pub async fn fetch_detail_page(&self, url: &str) -> Result<Html> {
        log::debug!("Fetching detail page: {url}");
        let html = self.render(url, false).await?;
        Ok(Html::parse_document(&html))
    }

    async fn render(&self, url: &str, scroll_to_bottom: bool) -> Result<String> {
        self.retry
            .run(url, move || self.source.render(url, scroll_to_bottom))
            .await
    }
}

/// Build the search URL for a listing page.
///
/// Path: base, offering type, estate type, city, district.
/// Query: radius, page number, limit, price and area bounds, then the
/// raw suffix.
pub fn listing_url(search: &SearchConfig, page: u32) -> Result<Url> {
    let mut url = Url::parse(&search.base_url)?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| AppError::config("search.base_url cannot hold a path"))?;
        segments.pop_if_empty();
        let parts = [
            Some(search.offering_type.as_str()),
            Some(search.estate_type.as_str()),
            Some(search.city.as_str()),
            search.district.as_deref(),
        ];
        for part in parts.into_iter().flatten() {
            segments.extend(part.split('/').filter(|s| !s.is_empty()));
        }
    }

    {
        let mut query = url.query_pairs_mut();
        if let Some(radius) = search.radius {
            query.append_pair("distanceRadius", &radius.to_string());
        }
        query.append_pair(&search.pagination, &page.to_string());
        query.append_pair("limit", &search.limit.to_string());

        let bounds = [
            ("priceMin", search.price_min),
            ("priceMax", search.price_max),
            ("areaMin", search.area_min.map(u64::from)),
            ("areaMax", search.area_max.map(u64::from)),
        ];
        for (name, value) in bounds {
            if let Some(value) = value {
                query.append_pair(name, &value.to_string());
            }
        }
    }

    let suffix = search.suffix.trim_start_matches(['?', '&']);
    if !suffix.is_empty() {
        let query = match url.query() {
            Some(q) if !q.is_empty() => format!("{q}&{suffix}"),
            _ => suffix.to_string(),
        };
        url.set_query(Some(&query));
    }

    Ok(url)
}
