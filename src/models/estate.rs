//! Estate records produced by the scraper.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Field values as read from a detail page, before normalization.
///
/// `None` means the node for that field was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDetails {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RawDetails {
    /// Name of the first field with no value, in record order.
    pub fn first_missing(&self) -> Option<&'static str> {
        [
            ("price", &self.price),
            ("size", &self.size),
            ("location", &self.location),
            ("description", &self.description),
        ]
        .into_iter()
        .find_map(|(name, value)| value.is_none().then_some(name))
    }
}

/// Validated estate details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstateDetails {
    /// Price without the currency suffix
    pub price: String,

    /// Floor area without the unit suffix
    pub size: String,

    pub location: String,

    /// Single-line, NFKD-normalized description
    pub description: String,
}

/// One scraped announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Estate {
    /// Absolute detail page URL
    pub url: String,

    /// Announcement title, if the page has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub details: EstateDetails,
}

impl Estate {
    pub fn new(url: impl Into<String>, title: Option<String>, details: EstateDetails) -> Self {
        Self {
            url: url.into(),
            title,
            details,
        }
    }
}

impl fmt::Display for EstateDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "price='{}' size='{}' location='{}' description='{}'",
            self.price, self.size, self.location, self.description
        )
    }
}

impl fmt::Display for Estate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "url='{}'", self.url)?;
        if let Some(title) = &self.title {
            write!(f, " title='{title}'")?;
        }
        write!(f, " {}", self.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> EstateDetails {
        EstateDetails {
            price: "500000".to_string(),
            size: "50".to_string(),
            location: "Warsaw".to_string(),
            description: "Hello World".to_string(),
        }
    }

    #[test]
    fn test_display_single_line() {
        let estate = Estate::new("https://example.com/ad/123", None, sample_details());
        let line = estate.to_string();
        assert_eq!(
            line,
            "url='https://example.com/ad/123' price='500000' size='50' location='Warsaw' description='Hello World'"
        );
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_display_with_title() {
        let estate = Estate::new(
            "https://example.com/ad/1",
            Some("Sunny flat".to_string()),
            sample_details(),
        );
        assert!(estate.to_string().starts_with("url='https://example.com/ad/1' title='Sunny flat' "));
    }

    #[test]
    fn test_first_missing() {
        let raw = RawDetails {
            price: Some("1".to_string()),
            size: Some("2".to_string()),
            location: None,
            description: None,
        };
        assert_eq!(raw.first_missing(), Some("location"));
        assert_eq!(RawDetails::default().first_missing(), Some("price"));
    }

    #[test]
    fn test_details_reject_extra_fields() {
        let json = r#"{"price":"1","size":"2","location":"x","description":"y","rooms":"3"}"#;
        assert!(serde_json::from_str::<EstateDetails>(json).is_err());
    }
}
