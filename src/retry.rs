//! Retry logic with exponential backoff for provider calls.
//!
//! Only transport failures (timeout, connection failure) are retried;
//! application-level errors from the provider propagate immediately. With
//! the default policy the waits are roughly 2s, 4s, 8s capped at 10s.

use crate::error::LlmResult;
use crate::logging::{log_debug, log_warn};
use std::time::Duration;
use tokio::time::sleep;

/// Retry policy configuration for provider requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap on the delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Calculate the backoff delay after a failed attempt (1-based).
    ///
    /// Adds up to 10% jitter to prevent thundering herd against a provider
    /// that is recovering.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay_seconds = self.initial_delay.as_secs_f64()
            * self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        let delay = delay_seconds.min(self.max_delay.as_secs_f64());

        let jitter = fastrand::f64() * 0.1;
        Duration::from_secs_f64(delay * (1.0 + jitter))
    }

    /// Run `operation` with this policy.
    ///
    /// Retries only errors where [`crate::error::LlmError::is_retryable`]
    /// holds; any other
    /// error returns on the spot. After exhausting attempts, the last
    /// transport error propagates.
    pub async fn run<F, Fut, T>(&self, operation: F) -> LlmResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = LlmResult<T>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            log_debug!(
                attempt = attempt,
                max_attempts = self.max_attempts,
                "Executing provider request"
            );

            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    log_warn!(
                        attempt = attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis(),
                        error = %error,
                        "Transport failure, retrying after delay"
                    );
                    sleep(delay).await;
                }
                // Non-retryable, or the final attempt's transport error
                Err(error) => return Err(error),
            }
        }
    }
}
