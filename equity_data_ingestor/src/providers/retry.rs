//! Bounded retry with exponential backoff for provider calls.

use std::{future::Future, num::NonZeroU32, time::Duration};

use nonzero_ext::nonzero;
use tracing::warn;

use crate::providers::ProviderError;

/// How many times a provider call is attempted and how long to wait in between.
///
/// The wait before retry `n` (0-based) is `base_delay * 2^n`. Only errors for which
/// [`ProviderError::is_retryable`] holds are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: NonZeroU32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: nonzero!(3u32),
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: nonzero!(1u32),
            base_delay: Duration::ZERO,
        }
    }

    /// Backoff before the retry that follows failed attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or attempts run out.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let max_attempts = self.max_attempts.get();
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        what,
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "provider call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::providers::{ApiSnafu, RateLimitedSnafu};

    fn fast(max_attempts: NonZeroU32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::ZERO,
        }
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4000));
    }

    #[tokio::test]
    async fn retries_retryable_errors_until_exhausted() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result: Result<(), _> = fast(nonzero!(3u32))
            .run("test", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                RateLimitedSnafu { message: "Note" }.fail()
            })
            .await;

        assert!(matches!(result, Err(ProviderError::RateLimited { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_on_first_success() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result = fast(nonzero!(3u32))
            .run("test", || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    RateLimitedSnafu { message: "Note" }.fail()
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_api_errors() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result: Result<(), _> = fast(nonzero!(3u32))
            .run("test", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                ApiSnafu { message: "Invalid API call" }.fail()
            })
            .await;

        assert!(matches!(result, Err(ProviderError::Api { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
