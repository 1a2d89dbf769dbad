//! Scraper parameters (`parameters.toml`).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::read_toml;

/// Root scraper configuration.
///
/// Loaded once at startup and shared read-only for the rest of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listing search URL segments
    pub search: SearchConfig,

    /// Page rendering backend settings
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Fetch retry schedule
    #[serde(default)]
    pub retry: RetryConfig,

    /// Pagination and politeness settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Field normalization rules
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Result file settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load parameters from a TOML file.
    ///
    /// A missing or empty file is a configuration error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_toml(path.as_ref(), "Parameters")
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.search.base_url).map_err(|e| {
            AppError::config(format!("search.base_url '{}': {e}", self.search.base_url))
        })?;
        Url::parse(&self.search.result_base_url).map_err(|e| {
            AppError::config(format!(
                "search.result_base_url '{}': {e}",
                self.search.result_base_url
            ))
        })?;

        let required = [
            ("search.offering_type", &self.search.offering_type),
            ("search.estate_type", &self.search.estate_type),
            ("search.city", &self.search.city),
            ("search.pagination", &self.search.pagination),
            ("browser.user_agent", &self.browser.user_agent),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::config(format!("{name} is empty")));
            }
        }

        if self.search.limit == 0 {
            return Err(AppError::config("search.limit must be > 0"));
        }
        if self.browser.timeout_secs == 0 {
            return Err(AppError::config("browser.timeout_secs must be > 0"));
        }
        if self.retry.min_delay_ms > self.retry.max_delay_ms {
            return Err(AppError::config(
                "retry.min_delay_ms must not exceed retry.max_delay_ms",
            ));
        }
        if self.output.results_file.as_os_str().is_empty() {
            return Err(AppError::config("output.results_file is empty"));
        }
        Ok(())
    }
}

/// Segments of the listing search URL, joined in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search root, e.g. `https://www.otodom.pl/pl/wyniki`
    pub base_url: String,

    /// Offering type path segment (`sprzedaz`, `wynajem`)
    pub offering_type: String,

    /// Estate type path segment (`mieszkanie`, `dom`, ...)
    pub estate_type: String,

    /// City path, may span several segments (`mazowieckie/warszawa`)
    pub city: String,

    #[serde(default)]
    pub district: Option<String>,

    /// Search radius in kilometres
    #[serde(default)]
    pub radius: Option<u32>,

    /// Name of the page-number query parameter
    #[serde(default = "defaults::pagination")]
    pub pagination: String,

    /// Results per listing page
    #[serde(default = "defaults::limit")]
    pub limit: u32,

    #[serde(default)]
    pub price_min: Option<u64>,
    #[serde(default)]
    pub price_max: Option<u64>,
    #[serde(default)]
    pub area_min: Option<u32>,
    #[serde(default)]
    pub area_max: Option<u32>,

    /// Raw query string appended after every other parameter
    #[serde(default)]
    pub suffix: String,

    /// Base used to resolve detail-page links found on listing pages
    pub result_base_url: String,
}

/// Which backend renders pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserBackend {
    /// Headless Chrome, executes scripts and lazy loading
    #[default]
    Chrome,
    /// Plain HTTP GET, no script execution
    Http,
}

/// Page rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub backend: BrowserBackend,

    /// User-Agent sent by every backend
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    #[serde(default = "defaults::headless")]
    pub headless: bool,

    /// Navigation/request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Wait after scrolling so lazy content can render, in milliseconds
    #[serde(default = "defaults::render_wait")]
    pub render_wait_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            backend: BrowserBackend::default(),
            user_agent: defaults::user_agent(),
            headless: defaults::headless(),
            timeout_secs: defaults::timeout(),
            render_wait_ms: defaults::render_wait(),
        }
    }
}

/// Exponential backoff settings for page fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per fetch; 0 retries forever
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "defaults::multiplier")]
    pub multiplier_ms: u64,

    #[serde(default = "defaults::min_delay")]
    pub min_delay_ms: u64,

    #[serde(default = "defaults::max_delay")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::max_attempts(),
            multiplier_ms: defaults::multiplier(),
            min_delay_ms: defaults::min_delay(),
            max_delay_ms: defaults::max_delay(),
        }
    }
}

/// Pagination and politeness settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Pause between detail page visits in milliseconds
    #[serde(default = "defaults::sleep")]
    pub sleep_ms: u64,

    /// Maximum listing pages to visit; 0 means no ceiling
    #[serde(default)]
    pub page_limit: u32,

    /// Log every parsed entry
    #[serde(default)]
    pub verbose_logging: bool,
}

impl CrawlerConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.sleep_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            sleep_ms: defaults::sleep(),
            page_limit: 0,
            verbose_logging: false,
        }
    }
}

/// Field normalization rules applied by the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Currency suffix stripped from prices
    #[serde(default = "defaults::price_suffix")]
    pub price_suffix: String,

    /// Area suffix stripped from sizes
    #[serde(default = "defaults::size_suffix")]
    pub size_suffix: String,

    /// Phrases removed from descriptions
    #[serde(default = "defaults::description_boilerplate")]
    pub description_boilerplate: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            price_suffix: defaults::price_suffix(),
            size_suffix: defaults::size_suffix(),
            description_boilerplate: defaults::description_boilerplate(),
        }
    }
}

/// Line format of the results file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable record per line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Result file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::results_file")]
    pub results_file: std::path::PathBuf,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_file: defaults::results_file(),
            format: OutputFormat::default(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Search defaults
    pub fn pagination() -> String {
        "page".into()
    }
    pub fn limit() -> u32 {
        36
    }

    // Browser defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0".into()
    }
    pub fn headless() -> bool {
        true
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn render_wait() -> u64 {
        1500
    }

    // Retry defaults
    pub fn max_attempts() -> u32 {
        8
    }
    pub fn multiplier() -> u64 {
        1000
    }
    pub fn min_delay() -> u64 {
        2000
    }
    pub fn max_delay() -> u64 {
        5000
    }

    // Crawler defaults
    pub fn sleep() -> u64 {
        1000
    }

    // Validation defaults
    pub fn price_suffix() -> String {
        " zł".into()
    }
    pub fn size_suffix() -> String {
        " m²".into()
    }
    pub fn description_boilerplate() -> Vec<String> {
        vec!["Pokaż więcej".into(), "Pokaż mniej".into()]
    }

    // Output defaults
    pub fn results_file() -> PathBuf {
        PathBuf::from("results.txt")
    }
}

#[cfg(test)]
impl Config {
    /// Minimal configuration with no delays, pointing at example.com.
    pub(crate) fn for_tests() -> Self {
        let mut config: Self = toml::from_str(
            r#"
            [search]
            base_url = "https://example.com/pl/wyniki"
            offering_type = "sprzedaz"
            estate_type = "mieszkanie"
            city = "mazowieckie/warszawa"
            result_base_url = "https://example.com"
            "#,
        )
        .unwrap();
        config.crawler.sleep_ms = 0;
        config.retry.min_delay_ms = 0;
        config.retry.max_delay_ms = 0;
        config.retry.multiplier_ms = 0;
        config.retry.max_attempts = 3;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_test_config_ok() {
        assert!(Config::for_tests().validate().is_ok());
    }

    #[test]
    fn defaults_filled_from_minimal_file() {
        let config = Config::for_tests();
        assert_eq!(config.search.pagination, "page");
        assert_eq!(config.search.limit, 36);
        assert_eq!(config.browser.backend, BrowserBackend::Chrome);
        assert_eq!(config.validation.price_suffix, " zł");
        assert_eq!(config.validation.size_suffix, " m²");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.crawler.page_limit, 0);
    }

    #[test]
    fn missing_search_section_is_rejected() {
        let parsed: std::result::Result<Config, _> = toml::from_str("[crawler]\npage_limit = 2\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::for_tests();
        config.browser.user_agent = "  ".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::for_tests();
        config.search.result_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_retry_bounds() {
        let mut config = Config::for_tests();
        config.retry.min_delay_ms = 10;
        config.retry.max_delay_ms = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn backend_and_format_parse_lowercase() {
        let browser: BrowserConfig = toml::from_str("backend = \"http\"").unwrap();
        assert_eq!(browser.backend, BrowserBackend::Http);
        let output: OutputConfig = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(output.format, OutputFormat::Json);
    }
}
