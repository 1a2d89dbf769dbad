//! Compiled CSS selectors for listing and detail pages.

use scraper::Selector;

use crate::error::{AppError, Result};
use crate::models::Presets;

/// Selectors built once from the presets and shared by the extractors.
#[derive(Debug, Clone)]
pub struct EstateSelectors {
    /// `div` nodes of the details summary
    pub details_summary: Selector,
    pub price: Selector,
    pub location: Selector,
    pub description: Selector,
    pub title: Selector,
    /// `li` entries on a listing page
    pub listing_item: Selector,
    /// Links inside a listing entry
    pub anchor: Selector,
}

impl EstateSelectors {
    /// Compile every preset; an unusable class name is a configuration error.
    pub fn from_presets(presets: &Presets) -> Result<Self> {
        Ok(Self {
            details_summary: class_selector("div", &presets.estate_details_class)?,
            price: class_selector("strong", &presets.estate_price_class)?,
            location: class_selector("a", &presets.estate_location_class)?,
            description: class_selector("div", &presets.estate_description_class)?,
            title: class_selector("h1", &presets.estate_title_class)?,
            listing_item: class_selector("li", &presets.li_listing_class)?,
            anchor: parse_selector("a[href]")?,
        })
    }
}

/// Selector for `tag` elements carrying every class in `classes`.
///
/// `classes` is a `class` attribute value, so `"a b"` becomes `tag.a.b`.
pub fn class_selector(tag: &str, classes: &str) -> Result<Selector> {
    let classes: Vec<&str> = classes.split_whitespace().collect();
    if classes.is_empty() {
        return Err(AppError::config(format!("no class given for <{tag}>")));
    }
    parse_selector(&format!("{tag}.{}", classes.join(".")))
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
