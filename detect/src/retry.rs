//! Bounded retry with a fixed pause.

use std::future::Future;
use std::time::Duration;

/// Retry policy: a fixed number of attempts with a constant pause between
/// them. No exponential growth; the backends this service talks to either
/// recover within a second or not at all within the request budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (treated as at least 1).
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Runs `op` until it succeeds or attempts are exhausted.
    ///
    /// Every error is retryable; the closure receives the 1-based attempt
    /// number. Returns the last error on exhaustion.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let attempts = self.max_attempts.max(1);
        for attempt in 1..attempts {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(attempt, max_attempts = attempts, "attempt failed: {}", e);
                    tokio::time::sleep(self.backoff).await;
                }
            }
        }
        match op(attempts).await {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(attempt = attempts, max_attempts = attempts, "attempt failed: {}", e);
                Err(e)
            }
        }
    }
}
