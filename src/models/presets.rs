// src/models/presets.rs

//! CSS class presets for the Otodom markup (`presets.toml`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::read_toml;

/// Class names of the DOM nodes the scraper reads.
///
/// Each value is the `class` attribute of the node; space-separated values
/// require every listed class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Presets {
    /// `div` nodes of the details summary; the first one holds the size
    pub estate_details_class: String,

    /// `strong` node holding the price
    pub estate_price_class: String,

    /// `a` node holding the location
    pub estate_location_class: String,

    /// `div` node holding the description
    pub estate_description_class: String,

    /// `li` nodes of the listing page
    pub li_listing_class: String,

    /// `h1` node holding the announcement title
    pub estate_title_class: String,
}

impl Presets {
    /// Load presets from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_toml(path.as_ref(), "Presets")
    }

    /// Every preset must name at least one class.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.entries() {
            if value.trim().is_empty() {
                return Err(AppError::config(format!("preset {name} is empty")));
            }
        }
        Ok(())
    }

    /// Preset names paired with their values.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("estate_details_class", &self.estate_details_class),
            ("estate_price_class", &self.estate_price_class),
            ("estate_location_class", &self.estate_location_class),
            ("estate_description_class", &self.estate_description_class),
            ("li_listing_class", &self.li_listing_class),
            ("estate_title_class", &self.estate_title_class),
        ]
    }
}

#[cfg(test)]
impl Presets {
    pub(crate) fn for_tests() -> Self {
        Self {
            estate_details_class: "summary".to_string(),
            estate_price_class: "price".to_string(),
            estate_location_class: "location".to_string(),
            estate_description_class: "description".to_string(),
            li_listing_class: "offer".to_string(),
            estate_title_class: "title".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(Presets::for_tests().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_class() {
        let mut presets = Presets::for_tests();
        presets.estate_price_class = " ".to_string();
        let err = presets.validate().unwrap_err();
        assert!(err.to_string().contains("estate_price_class"));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let text = r#"
            estate_details_class = "a"
            estate_price_class = "b"
            estate_location_class = "c"
            estate_description_class = "d"
            li_listing_class = "e"
            estate_title_class = "f"
            estate_rooms_class = "g"
        "#;
        assert!(toml::from_str::<Presets>(text).is_err());
    }
}
