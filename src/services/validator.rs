//! Field validation and normalization.
//!
//! Turns the raw strings read from a detail page into `EstateDetails`.

use unicode_normalization::UnicodeNormalization;

use crate::error::{AppError, Result};
use crate::models::{EstateDetails, RawDetails, ValidationConfig};

/// Validates raw detail fields against the configured normalization rules.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    rules: ValidationConfig,
}

impl FieldValidator {
    pub fn new(rules: &ValidationConfig) -> Self {
        Self {
            rules: rules.clone(),
        }
    }

    /// Validate a raw record; every field must be present.
    pub fn validate(&self, raw: RawDetails) -> Result<EstateDetails> {
        let missing = raw.first_missing();
        match (raw.price, raw.size, raw.location, raw.description) {
            (Some(price), Some(size), Some(location), Some(description)) => Ok(EstateDetails {
                price: self.clean_price(&price),
                size: self.clean_size(&size),
                location,
                description: self.clean_description(&description),
            }),
            _ => Err(AppError::validation(format!(
                "field '{}' is missing",
                missing.unwrap_or("unknown")
            ))),
        }
    }

    /// Strip the currency suffix, if present.
    pub fn clean_price(&self, price: &str) -> String {
        price
            .strip_suffix(self.rules.price_suffix.as_str())
            .unwrap_or(price)
            .to_string()
    }

    /// Strip the area unit suffix, if present.
    pub fn clean_size(&self, size: &str) -> String {
        size.strip_suffix(self.rules.size_suffix.as_str())
            .unwrap_or(size)
            .to_string()
    }

    /// Flatten newlines, NFKD-normalize, then remove boilerplate phrases.
    ///
    /// Phrases are matched in their NFKD form, so a phrase written with a
    /// non-breaking space is removed too. Removal repeats until no phrase
    /// is left, since cutting one occurrence can join another.
    pub fn clean_description(&self, description: &str) -> String {
        let phrases: Vec<String> = self
            .rules
            .description_boilerplate
            .iter()
            .filter(|phrase| !phrase.is_empty())
            .map(|phrase| phrase.replace('\n', " ").nfkd().collect())
            .collect();

        let mut result: String = description.replace('\n', " ").nfkd().collect();
        loop {
            let before = result.len();
            for phrase in &phrases {
                result = result.replace(phrase.as_str(), "");
            }
            if result.len() == before {
                break;
            }
        }
        // Cuts can leave combining marks out of canonical order.
        result.nfkd().collect()
    }
}
