//! Utility functions and helpers.

pub mod retry;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Read a required, non-empty TOML file.
///
/// `what` names the file in error messages ("Parameters", "Presets").
pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::config(format!(
                "{what} file does not exist: {}",
                path.display()
            )));
        }
        Err(e) => return Err(AppError::Io(e)),
    };

    if content.trim().is_empty() {
        return Err(AppError::config(format!(
            "{what} file is empty: {}",
            path.display()
        )));
    }

    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com").unwrap();
        assert_eq!(resolve_url(&base, "/ad/123"), "https://example.com/ad/123");
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );

        let nested = Url::parse("https://example.com/pl/oferta/").unwrap();
        assert_eq!(
            resolve_url(&nested, "abc-ID1"),
            "https://example.com/pl/oferta/abc-ID1"
        );
    }

    #[test]
    fn test_read_toml_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_toml::<BTreeMap<String, String>>(&tmp.path().join("nope.toml"), "Presets")
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("Presets file does not exist"));
    }

    #[test]
    fn test_read_toml_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.toml");
        fs::write(&path, "  \n").unwrap();
        let err = read_toml::<BTreeMap<String, String>>(&path, "Parameters").unwrap_err();
        assert!(err.to_string().contains("Parameters file is empty"));
    }

    #[test]
    fn test_read_toml_ok() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ok.toml");
        fs::write(&path, "key = \"value\"\n").unwrap();
        let map: BTreeMap<String, String> = read_toml(&path, "Parameters").unwrap();
        assert_eq!(map.get("key").map(String::as_str), Some("value"));
    }
}
