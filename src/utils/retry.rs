// src/utils/retry.rs

//! Exponential backoff for page fetches.

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::RetryConfig;

/// Retry schedule: `multiplier * 2^(n-1)` after the n-th failure, clamped to
/// `[min_delay, max_delay]`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 0 never gives up
    max_attempts: u32,
    multiplier: Duration,
    min_delay: Duration,
    max_delay: Duration,
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            multiplier: Duration::from_millis(config.multiplier_ms),
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

impl RetryPolicy {
    /// Wait before the next attempt, given the 1-based number of the
    /// attempt that just failed.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32
            .checked_pow(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.multiplier
            .saturating_mul(factor)
            .max(self.min_delay)
            .min(self.max_delay)
    }

    fn exhausted(&self, attempt: u32) -> bool {
        self.max_attempts != 0 && attempt >= self.max_attempts
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or the
    /// attempt ceiling is reached.
    pub async fn run<T, F, Fut>(&self, context: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            let error = match op().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => e,
            };

            if self.exhausted(attempt) {
                return Err(AppError::RetriesExhausted {
                    context: context.to_string(),
                    attempts: attempt,
                    source: Box::new(error),
                });
            }

            let delay = self.delay_after(attempt);
            log::warn!(
                "Fetching {} failed (attempt {}): {}. Retrying in {}ms",
                context,
                attempt,
                error,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }
}
