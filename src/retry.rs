//! Retry policy with exponential backoff for fallible async operations.
//!
//! Only transient error kinds ([`FetchError::is_retryable`]) are retried;
//! terminal kinds propagate on first occurrence. The cancellation token is
//! checked before every attempt, including the first, so an already
//! cancelled call never invokes the operation at all.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::error::FetchError;

/// Default number of additional attempts after the first failure.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for the exponential backoff.
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Configuration for [`retry_with_backoff`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries (total attempts = `max_retries + 1`)
    pub max_retries: u32,
    /// Base backoff delay; attempt `n` waits `base_delay * 2^n`
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after the given zero-based failed attempt.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Run `operation` until it succeeds, fails terminally, or the retry budget
/// is exhausted (the last error is returned).
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut last_error = None;

    for attempt in 0..=policy.max_retries {
        cancel.check()?;

        if attempt > 0 {
            let delay = policy.delay_for(attempt - 1);
            debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying after backoff");
            tokio::time::sleep(delay).await;
            cancel.check()?;
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                debug!(attempt, error = %err, "retryable failure");
                last_error = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    // Loop always assigns before falling through
    Err(last_error.unwrap_or(FetchError::Cancelled))
}
