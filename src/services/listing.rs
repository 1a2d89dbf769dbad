// src/services/listing.rs

//! Listing page extraction.
//!
//! Collects detail links from a listing page, then visits each link in turn.

use std::sync::Arc;
use std::time::Duration;

use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, Estate};
use crate::services::{DetailExtractor, EstateSelectors, PageFetcher};
use crate::utils::resolve_url;

/// Records gathered from one listing page.
#[derive(Debug, Default)]
pub struct PageHarvest {
    pub estates: Vec<Estate>,
    /// Detail pages visited
    pub visited: usize,
    /// Detail pages that produced no record
    pub skipped: usize,
}

/// Drives detail extraction for every entry of a listing page.
pub struct ListingExtractor {
    selectors: Arc<EstateSelectors>,
    details: DetailExtractor,
    base_url: Url,
    politeness_delay: Duration,
    verbose: bool,
}

impl ListingExtractor {
    pub fn new(
        selectors: Arc<EstateSelectors>,
        details: DetailExtractor,
        config: &Config,
    ) -> Result<Self> {
        let base_url = Url::parse(&config.search.result_base_url).map_err(|e| {
            AppError::config(format!(
                "search.result_base_url '{}': {e}",
                config.search.result_base_url
            ))
        })?;

        Ok(Self {
            selectors,
            details,
            base_url,
            politeness_delay: config.crawler.politeness_delay(),
            verbose: config.crawler.verbose_logging,
        })
    }

    /// Absolute detail page URLs of every link in every listing entry,
    /// in document order.
    pub fn detail_urls(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.selectors.listing_item)
            .flat_map(|item| item.select(&self.selectors.anchor))
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(|href| resolve_url(&self.base_url, href))
            .collect()
    }

    /// Visit each detail page and build its `Estate`.
    ///
    /// Pages that cannot be fetched or extracted are skipped.
    pub async fn harvest(&self, fetcher: &PageFetcher, urls: &[String]) -> PageHarvest {
        let mut harvest = PageHarvest::default();

        for url in urls {
            harvest.visited += 1;

            let parsed = match fetcher.fetch_detail_page(url).await {
                Ok(document) => self
                    .details
                    .extract(&document)
                    .map(|details| (self.details.title(&document), details)),
                Err(e) => {
                    log::error!("Failed to fetch estate page {url}: {e}");
                    None
                }
            };

            let Some((title, details)) = parsed else {
                log::debug!("Skipping {url}");
                harvest.skipped += 1;
                continue;
            };

            if self.politeness_delay.as_millis() > 0 {
                tokio::time::sleep(self.politeness_delay).await;
            }

            let estate = Estate::new(url.as_str(), title, details);
            if self.verbose {
                log::info!("New entry parsed:\n{estate}");
            }
            harvest.estates.push(estate);
        }

        harvest
    }
}
