//! Service layer for the scraper.
//!
//! This module contains the business logic for:
//! - Selector compilation (`EstateSelectors`)
//! - Field normalization (`FieldValidator`)
//! - Detail page extraction (`DetailExtractor`)
//! - Listing page extraction (`ListingExtractor`)
//! - Page fetching with retries (`PageFetcher`)

mod details;
mod fetcher;
mod listing;
mod selectors;
mod validator;

pub use details::{DetailExtractor, NO_DATA};
pub use fetcher::{PageFetcher, listing_url};
pub use listing::{ListingExtractor, PageHarvest};
pub use selectors::{EstateSelectors, class_selector};
pub use validator::FieldValidator;
