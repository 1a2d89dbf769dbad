//! Pipeline entry points.
//!
//! - `run_scraper`: paginate, extract every estate, write the results

pub mod scrape;

pub use scrape::{ScrapeOutcome, Scraper, run_scraper};
