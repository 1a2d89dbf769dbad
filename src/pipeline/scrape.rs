// src/pipeline/scrape.rs

//! Pagination pipeline.
//!
//! Walks listing pages 1, 2, ... until a page yields no estates or the page
//! ceiling is reached, then hands every record to the sink.

use std::sync::Arc;

use chrono::Utc;

use crate::browser::PageSource;
use crate::error::Result;
use crate::models::{Config, Estate, Presets, ScrapeStats, StopReason};
use crate::services::{
    DetailExtractor, EstateSelectors, FieldValidator, ListingExtractor, PageFetcher,
};
use crate::storage::ResultSink;

/// Records and statistics of one run.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub estates: Vec<Estate>,
    pub stats: ScrapeStats,
}

enum State {
    Start,
    FetchingPage(u32),
    ParsingPage { page: u32, urls: Vec<String> },
    Done(StopReason),
}

/// Sequential listing scraper.
pub struct Scraper {
    fetcher: PageFetcher,
    listing: ListingExtractor,
    page_limit: u32,
}

impl Scraper {
    pub fn new(config: &Config, presets: &Presets, source: Box<dyn PageSource>) -> Result<Self> {
        let selectors = Arc::new(EstateSelectors::from_presets(presets)?);
        let details = DetailExtractor::new(
            Arc::clone(&selectors),
            FieldValidator::new(&config.validation),
        );
        let listing = ListingExtractor::new(selectors, details, config)?;

        Ok(Self {
            fetcher: PageFetcher::new(source, config),
            listing,
            page_limit: config.crawler.page_limit,
        })
    }

    /// Scrape every listing page.
    ///
    /// A listing page that cannot be fetched ends the run early; the records
    /// gathered so far are still returned.
    pub async fn run(&self) -> ScrapeOutcome {
        let start_time = Utc::now();
        let mut estates = Vec::new();
        let mut page_count = 0;
        let mut detail_count = 0;
        let mut skipped_count = 0;

        let mut state = State::Start;
        let stop_reason = loop {
            state = match state {
                State::Start => State::FetchingPage(1),

                State::FetchingPage(page) => match self.listing_urls(page).await {
                    Ok(urls) => {
                        page_count += 1;
                        log::info!("Listing page {page}: {} links found", urls.len());
                        State::ParsingPage { page, urls }
                    }
                    Err(e) => {
                        log::error!("Failed to fetch listing page {page}: {e}");
                        State::Done(StopReason::FetchFailed(e.to_string()))
                    }
                },

                State::ParsingPage { page, urls } => {
                    let harvest = self.listing.harvest(&self.fetcher, &urls).await;
                    detail_count += harvest.visited;
                    skipped_count += harvest.skipped;
                    let found = harvest.estates.len();
                    estates.extend(harvest.estates);

                    if found == 0 {
                        log::info!("Listing page {page} yielded no estates, stopping");
                        State::Done(StopReason::EmptyPage)
                    } else {
                        log::info!("Listing page {page}: {found} estates parsed");
                        let next = page + 1;
                        if self.page_limit != 0 && next > self.page_limit {
                            log::info!("Page limit {} reached", self.page_limit);
                            State::Done(StopReason::PageLimit)
                        } else {
                            State::FetchingPage(next)
                        }
                    }
                }

                State::Done(reason) => break reason,
            };
        };

        let stats = ScrapeStats {
            start_time,
            end_time: Utc::now(),
            page_count,
            detail_count,
            skipped_count,
            estate_count: estates.len(),
            stop_reason,
        };

        log::info!(
            "Scraping took {:.1}s: {} estates from {} pages ({} skipped)",
            stats.elapsed().num_milliseconds() as f64 / 1000.0,
            stats.estate_count,
            stats.page_count,
            stats.skipped_count
        );

        ScrapeOutcome { estates, stats }
    }

    async fn listing_urls(&self, page: u32) -> Result<Vec<String>> {
        let document = self.fetcher.fetch_listing_page(page).await?;
        Ok(self.listing.detail_urls(&document))
    }
}

/// Run the scraper and write its results.
pub async fn run_scraper(
    config: &Config,
    presets: &Presets,
    source: Box<dyn PageSource>,
    sink: &dyn ResultSink,
) -> Result<ScrapeOutcome> {
    let scraper = Scraper::new(config, presets, source)?;
    let outcome = scraper.run().await;

    if let StopReason::FetchFailed(reason) = &outcome.stats.stop_reason {
        log::warn!("Run ended early ({reason}); writing partial results");
    }

    let summary = sink.write_estates(&outcome.estates).await?;
    log::info!(
        "Saved {} estates to {} at {}",
        summary.record_count,
        summary.location,
        summary.timestamp.format("%Y-%m-%d %H:%M:%S")
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::testing::StaticSource;
    use crate::models::{EstateDetails, OutputFormat};
    use crate::storage::FileSink;
    use tempfile::TempDir;

    const DETAIL: &str = r#"
        <strong class="price">500000 zł</strong>
        <div class="summary">50 m²</div>
        <a class="location">Warsaw</a>
        <div class="description">Hello
World</div>"#;

    const EMPTY: &str = "<html><body><ul></ul></body></html>";

    fn listing_url(config: &Config, page: u32) -> String {
        crate::services::listing_url(&config.search, page)
            .unwrap()
            .to_string()
    }

    fn listing_page(hrefs: &[&str]) -> String {
        let items: String = hrefs
            .iter()
            .map(|href| format!(r#"<li class="offer"><a href="{href}">offer</a></li>"#))
            .collect();
        format!("<html><body><ul>{items}</ul></body></html>")
    }

    fn scraper(config: &Config, source: &Arc<StaticSource>) -> Scraper {
        Scraper::new(config, &Presets::for_tests(), Box::new(Arc::clone(source))).unwrap()
    }

    fn listing_fetches(source: &StaticSource) -> usize {
        source.calls().iter().filter(|(_, scrolled)| *scrolled).count()
    }

    #[tokio::test]
    async fn test_end_to_end_single_estate() {
        let config = Config::for_tests();
        let source = Arc::new(
            StaticSource::new()
                .with_page(&listing_url(&config, 1), &listing_page(&["/ad/123"]))
                .with_page("https://example.com/ad/123", DETAIL)
                .with_fallback(EMPTY),
        );

        let outcome = scraper(&config, &source).run().await;

        assert_eq!(
            outcome.estates,
            vec![Estate::new(
                "https://example.com/ad/123",
                None,
                EstateDetails {
                    price: "500000".to_string(),
                    size: "50".to_string(),
                    location: "Warsaw".to_string(),
                    description: "Hello World".to_string(),
                },
            )]
        );
        assert_eq!(outcome.stats.stop_reason, StopReason::EmptyPage);
        assert_eq!(outcome.stats.page_count, 2);
        assert_eq!(
            source.urls(),
            vec![
                listing_url(&config, 1),
                "https://example.com/ad/123".to_string(),
                listing_url(&config, 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_first_page_stops_immediately() {
        let config = Config::for_tests();
        let source = Arc::new(StaticSource::new().with_fallback(EMPTY));

        let outcome = scraper(&config, &source).run().await;

        assert!(outcome.estates.is_empty());
        assert_eq!(outcome.stats.stop_reason, StopReason::EmptyPage);
        assert_eq!(source.urls(), vec![listing_url(&config, 1)]);
    }

    #[tokio::test]
    async fn test_page_limit_is_exact() {
        let mut config = Config::for_tests();
        config.crawler.page_limit = 2;
        // Every URL serves a page that is both a listing and a detail page.
        let combined = format!("{}{DETAIL}", listing_page(&["/ad/1"]));
        let source = Arc::new(StaticSource::new().with_fallback(&combined));

        let outcome = scraper(&config, &source).run().await;

        assert_eq!(listing_fetches(&source), 2);
        assert_eq!(outcome.estates.len(), 2);
        assert_eq!(outcome.stats.stop_reason, StopReason::PageLimit);
    }

    #[tokio::test]
    async fn test_page_with_only_broken_entries_stops() {
        let config = Config::for_tests();
        let source = Arc::new(
            StaticSource::new()
                .with_page(&listing_url(&config, 1), &listing_page(&["/ad/1", "/ad/2"]))
                .with_fallback("<p>removed</p>"),
        );

        let outcome = scraper(&config, &source).run().await;

        assert!(outcome.estates.is_empty());
        assert_eq!(outcome.stats.skipped_count, 2);
        assert_eq!(listing_fetches(&source), 1);
    }

    #[tokio::test]
    async fn test_listing_fetch_failure_keeps_partial_results() {
        let config = Config::for_tests();
        let source = Arc::new(
            StaticSource::new()
                .with_page(&listing_url(&config, 1), &listing_page(&["/ad/7"]))
                .with_page("https://example.com/ad/7", DETAIL),
        );

        let outcome = scraper(&config, &source).run().await;

        assert_eq!(outcome.estates.len(), 1);
        assert!(matches!(
            outcome.stats.stop_reason,
            StopReason::FetchFailed(_)
        ));
        // Page 2 is attempted `max_attempts` times.
        assert_eq!(listing_fetches(&source), 1 + config.retry.max_attempts as usize);
    }

    #[tokio::test]
    async fn test_run_scraper_writes_results() {
        let tmp = TempDir::new().unwrap();
        let config = Config::for_tests();
        let source = StaticSource::new()
            .with_page(&listing_url(&config, 1), &listing_page(&["/ad/1", "/ad/2"]))
            .with_page("https://example.com/ad/1", DETAIL)
            .with_page("https://example.com/ad/2", DETAIL)
            .with_fallback(EMPTY);
        let sink = FileSink::new(tmp.path().join("results.txt"), OutputFormat::Text);

        let outcome = run_scraper(&config, &Presets::for_tests(), Box::new(source), &sink)
            .await
            .unwrap();

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), outcome.estates.len());
        assert!(lines[0].contains("https://example.com/ad/1"));
        assert!(lines[1].contains("https://example.com/ad/2"));
    }
}
