//! Retry policy and executor shared by the vendor client and media fetcher.
//!
//! A [`RetryPolicy`] owns the numbers (attempt ceiling, base delay, cap,
//! jitter); [`execute_with_policy`] owns the loop. Each call site supplies its
//! own retryable predicate, so the vendor client can retry only rate limits
//! while the media fetcher retries every non-4xx failure.
//!
//! Back-off schedule for the vendor defaults (`base = 1 000 ms`, cap 30 s,
//! jitter 20 %):
//!
//! | Retry after attempt | Base delay | With jitter        |
//! |---------------------|------------|--------------------|
//! | 0                   | 1 000 ms   | 1 000 – 1 200 ms   |
//! | 1                   | 2 000 ms   | 2 000 – 2 400 ms   |
//! | 2                   | 4 000 ms   | 4 000 – 4 800 ms   |
//! | 3                   | 8 000 ms   | 8 000 – 9 600 ms   |
//!
//! Jitter is only ever added, and the jittered delay is clamped to the cap.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 behave as 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Fraction of the exponential delay that may be added as random jitter.
    pub jitter_ratio: f64,
}

impl RetryPolicy {
    /// Scraping vendor: 5 attempts, 1 s doubling, 30 s cap, 20 % jitter.
    #[must_use]
    pub const fn vendor_default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_millis(30_000),
            jitter_ratio: 0.2,
        }
    }

    /// Media fetches: 3 attempts, 1 s doubling, no jitter.
    #[must_use]
    pub const fn media_default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_millis(30_000),
            jitter_ratio: 0.0,
        }
    }

    /// Policy that retries immediately; used by tests.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter_ratio: 0.0,
        }
    }

    /// Exponential component for the retry following `attempt` (0-indexed):
    /// `min(base * 2^attempt, cap)`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base_ms = duration_ms(self.base_delay);
        let cap_ms = duration_ms(self.max_delay);
        let exp_ms = base_ms.saturating_mul(2u64.saturating_pow(attempt));
        Duration::from_millis(exp_ms.min(cap_ms))
    }

    /// Delay for `attempt` given a jitter sample in `[0, 1)`.
    #[must_use]
    pub fn delay_with_sample(&self, attempt: u32, sample: f64) -> Duration {
        let backoff_ms = duration_ms(self.backoff(attempt));
        let cap_ms = duration_ms(self.max_delay);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let jitter_ms =
            (backoff_ms as f64 * self.jitter_ratio.max(0.0) * sample.clamp(0.0, 1.0)) as u64;
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(cap_ms))
    }

    /// Delay for `attempt` with a fresh random jitter sample.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        if self.jitter_ratio <= 0.0 {
            return self.backoff(attempt);
        }
        self.delay_with_sample(attempt, rand::random::<f64>())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::vendor_default()
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Why [`execute_with_policy`] gave up.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The predicate classified the error as not worth retrying.
    #[error("{0}")]
    Permanent(E),

    /// Every attempt failed with a retryable error.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },
}

impl<E> RetryError<E> {
    /// The underlying error from the final attempt.
    pub fn into_last(self) -> E {
        match self {
            RetryError::Permanent(err) | RetryError::Exhausted { last: err, .. } => err,
        }
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// `policy.max_attempts` attempts have been made.
///
/// `operation` receives the 0-indexed attempt number. Every retry is logged
/// with the attempt count and the delay about to be slept.
///
/// # Errors
///
/// - [`RetryError::Permanent`] for the first error `is_retryable` rejects.
/// - [`RetryError::Exhausted`] with the last error once attempts run out.
pub async fn execute_with_policy<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    label: &str,
    is_retryable: P,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        let err = match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retryable(&err) {
            return Err(RetryError::Permanent(err));
        }
        if attempt + 1 >= max_attempts {
            return Err(RetryError::Exhausted {
                attempts: attempt + 1,
                last: err,
            });
        }

        let delay = policy.delay(attempt);
        tracing::warn!(
            operation = label,
            attempt = attempt + 1,
            max_attempts,
            delay_ms = duration_ms(delay),
            error = %err,
            "transient failure, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
