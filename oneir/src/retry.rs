//! Retry policy for upstream calls.
//!
//! Default is a single retry after 500 ms, applied only to errors for which
//! [`DreamError::is_retryable`] holds.

use std::future::Future;
use std::time::Duration;

use crate::error::DreamError;

#[derive(Clone, Debug, PartialEq)]
pub enum RetryPolicy {
    /// Fail on the first error.
    None,
    /// Retry up to `max_retries` times with a constant delay.
    Fixed { max_retries: usize, interval: Duration },
    /// Retry with exponentially growing delays, capped at `max_interval`.
    Exponential {
        max_retries: usize,
        initial_interval: Duration,
        max_interval: Duration,
        multiplier: f64,
    },
}

impl RetryPolicy {
    pub fn none() -> Self {
        RetryPolicy::None
    }

    pub fn fixed(max_retries: usize, interval: Duration) -> Self {
        RetryPolicy::Fixed { max_retries, interval }
    }

    pub fn exponential(
        max_retries: usize,
        initial_interval: Duration,
        max_interval: Duration,
        multiplier: f64,
    ) -> Self {
        RetryPolicy::Exponential {
            max_retries,
            initial_interval,
            max_interval,
            multiplier,
        }
    }

    /// Whether retry number `retry` (0-based) is allowed.
    pub fn should_retry(&self, retry: usize) -> bool {
        retry < self.max_retries()
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay(&self, retry: usize) -> Duration {
        match self {
            RetryPolicy::None => Duration::ZERO,
            RetryPolicy::Fixed { interval, .. } => *interval,
            RetryPolicy::Exponential {
                initial_interval,
                max_interval,
                multiplier,
                ..
            } => {
                let exp = i32::try_from(retry).unwrap_or(i32::MAX);
                let secs = initial_interval.as_secs_f64() * multiplier.powi(exp);
                // Cap before converting: from_secs_f64 panics on overflow, inf and NaN.
                Duration::from_secs_f64(secs.min(max_interval.as_secs_f64()).max(0.0))
            }
        }
    }

    pub fn max_retries(&self) -> usize {
        match self {
            RetryPolicy::None => 0,
            RetryPolicy::Fixed { max_retries, .. } => *max_retries,
            RetryPolicy::Exponential { max_retries, .. } => *max_retries,
        }
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or retries run out.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, DreamError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DreamError>>,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) if e.is_retryable() && self.should_retry(retry) => {
                    let delay = self.delay(retry);
                    tracing::warn!(%e, retry = retry + 1, ?delay, "{} failed, retrying", what);
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::fixed(1, Duration::from_millis(500))
    }
}
