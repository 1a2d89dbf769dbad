// src/services/details.rs

//! Detail page extraction.
//!
//! Each field is looked up on its own selector:
//! - size: first node of the details summary
//! - price, location, description: first matching node

use std::sync::Arc;

use scraper::{Html, Selector};

use crate::models::{EstateDetails, RawDetails};
use crate::services::{EstateSelectors, FieldValidator};

/// Text recorded for a node that exists but has no readable text.
pub const NO_DATA: &str = "no data";

/// Extracts `EstateDetails` from a rendered detail page.
pub struct DetailExtractor {
    selectors: Arc<EstateSelectors>,
    validator: FieldValidator,
}

impl DetailExtractor {
    pub fn new(selectors: Arc<EstateSelectors>, validator: FieldValidator) -> Self {
        Self {
            selectors,
            validator,
        }
    }

    /// Read the raw field values; absent nodes stay `None`.
    pub fn lookup(&self, document: &Html) -> RawDetails {
        RawDetails {
            price: read_node(document, &self.selectors.price),
            size: read_node(document, &self.selectors.details_summary),
            location: read_node(document, &self.selectors.location),
            description: read_node(document, &self.selectors.description),
        }
    }

    /// Extract and validate the details of one estate.
    ///
    /// Returns `None` when a node is missing or validation fails; the
    /// caller skips the listing.
    pub fn extract(&self, document: &Html) -> Option<EstateDetails> {
        let raw = self.lookup(document);
        if let Some(field) = raw.first_missing() {
            log::error!("Error in parsing the estate details: no {field} node found");
            return None;
        }

        match self.validator.validate(raw) {
            Ok(details) => Some(details),
            Err(e) => {
                log::warn!("Estate details rejected: {e}");
                None
            }
        }
    }

    /// Announcement title, if the page has a non-empty one.
    pub fn title(&self, document: &Html) -> Option<String> {
        read_node(document, &self.selectors.title).filter(|title| title != NO_DATA)
    }
}

/// Trimmed text of the first node matching `selector`.
fn read_node(document: &Html, selector: &Selector) -> Option<String> {
    let node = document.select(selector).next()?;
    let text: String = node.text().collect();
    let text = text.trim();
    if text.is_empty() {
        Some(NO_DATA.to_string())
    } else {
        Some(text.to_string())
    }
}
