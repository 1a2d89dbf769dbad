//! Run statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why pagination ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum StopReason {
    /// A listing page yielded no records
    EmptyPage,
    /// The configured page ceiling was reached
    PageLimit,
    /// A listing page could not be fetched
    FetchFailed(String),
}

/// Statistics for one scrape run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Listing pages fetched
    pub page_count: u32,
    /// Detail pages visited
    pub detail_count: usize,
    /// Detail pages that produced no record
    pub skipped_count: usize,
    /// Records collected
    pub estate_count: usize,
    pub stop_reason: StopReason,
}

impl ScrapeStats {
    /// Wall-clock time from the first fetch to completion.
    pub fn elapsed(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}
