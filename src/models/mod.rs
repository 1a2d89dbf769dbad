// src/models/mod.rs

//! Domain models for the scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod estate;
mod presets;
mod stats;

// Re-export all public types
pub use config::{
    BrowserBackend, BrowserConfig, Config, CrawlerConfig, OutputConfig, OutputFormat, RetryConfig,
    SearchConfig, ValidationConfig,
};
pub use estate::{Estate, EstateDetails, RawDetails};
pub use presets::Presets;
pub use stats::{ScrapeStats, StopReason};
