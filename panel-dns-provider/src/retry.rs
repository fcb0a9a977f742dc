//! Retry decorator for remote calls
//!
//! Every Route 53 call site is wrapped by [`with_retry`]: the operation is a
//! closure producing a fresh future per attempt (each attempt is re-signed),
//! the classifier decides which errors are transient, and the policy bounds the
//! number of attempts and the delay between them.

use std::future::Future;
use std::time::Duration;

use crate::error::{ProviderError, Result};

/// Upper bound for a server-provided `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;

/// Bounded exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 disables retrying).
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub base_delay: Duration,
    /// Ceiling for the computed delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Set the number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Backoff for the given zero-based retry: `base * 2^attempt`, capped at `max_delay`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
        self.base_delay
            .saturating_mul(1_u32 << capped_attempt)
            .min(self.max_delay)
    }

    /// Delay before retrying after `error`. A `Retry-After` hint wins over the backoff.
    pub fn delay_for(&self, error: &ProviderError, attempt: u32) -> Duration {
        if let ProviderError::RateLimited {
            retry_after: Some(secs),
            ..
        } = error
        {
            Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
        } else {
            self.backoff_delay(attempt)
        }
    }
}

/// Default classifier: network errors, timeouts and throttling.
pub fn is_retryable(error: &ProviderError) -> bool {
    error.is_retryable()
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the policy
/// runs out of retries. The last error is returned.
pub async fn with_retry<T, F, Fut, C>(
    policy: &RetryPolicy,
    label: &str,
    classifier: C,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    C: Fn(&ProviderError) -> bool,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_retries && classifier(&e) => {
                let delay = policy.delay_for(&e, attempt);
                log::warn!(
                    "[route53] {label} failed (attempt {}/{}), retrying in {:.2}s: {e}",
                    attempt + 1,
                    policy.max_retries + 1,
                    delay.as_secs_f32(),
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
