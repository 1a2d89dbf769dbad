//! Storage abstractions for scrape results.
//!
//! The whole result collection is handed to a sink once, at the end of a run.

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Estate;

// Re-export for convenience
pub use local::FileSink;

/// Metadata about a completed write.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Records written
    pub record_count: usize,
    /// Where the records went
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

/// Trait for result destinations.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Replace the destination's contents with `estates`.
    async fn write_estates(&self, estates: &[Estate]) -> Result<WriteSummary>;
}
