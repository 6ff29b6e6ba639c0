//! Retry logic with exponential backoff
//!
//! The HTTP client runs every page fetch through [`fetch_with_retry`], so a brief
//! connectivity blip or a 503 from the catalog does not immediately surface as an
//! error state in the feed.
//!
//! # Example
//!
//! ```no_run
//! use rickmorty_feed::retry::{IsRetryable, fetch_with_retry};
//! use rickmorty_feed::config::RetryConfig;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Transient,
//!     Permanent,
//! }
//!
//! impl std::fmt::Display for MyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{:?}", self)
//!     }
//! }
//!
//! impl IsRetryable for MyError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, MyError::Transient)
//!     }
//! }
//!
//! # async fn example() -> Result<(), MyError> {
//! let config = RetryConfig::default();
//! let result = fetch_with_retry(&config, || async {
//!     // Your operation here
//!     Ok::<_, MyError>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

use crate::classifier::is_transport_io;
use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (timeouts, refused connections, overloaded server) return `true`.
/// Permanent failures (bad payload, not found, bad config) return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| is_retryable_status(s.as_u16()))
            }
            Error::Io(e) => is_transport_io(e.kind()),
            Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            // A malformed payload will be just as malformed next time
            Error::Serialization(_) => false,
            Error::InvalidResponse(_) => false,
            Error::InvalidUrl(_) => false,
            Error::Config { .. } => false,
            Error::Other(_) => false,
        }
    }
}

/// Rate limiting and gateway/availability failures
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 502 | 503 | 504)
}

/// Execute an async operation with exponential backoff retry logic
///
/// # Arguments
///
/// * `config` - Retry configuration (max attempts, delays, backoff multiplier, jitter)
/// * `operation` - Async closure that returns `Result<T, E>` where `E` implements [`IsRetryable`]
///
/// # Returns
///
/// Returns the successful result or the last error after all retry attempts are exhausted.
pub async fn fetch_with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut backoff = Backoff::new(config);
    let mut retries = 0;

    loop {
        let err = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    tracing::info!(retries, "Fetch succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if !err.is_retryable() {
            tracing::error!(error = %err, "Fetch failed with non-retryable error");
            return Err(err);
        }
        if retries >= config.max_attempts {
            tracing::error!(
                error = %err,
                attempts = retries + 1,
                "Fetch failed after all retry attempts exhausted"
            );
            return Err(err);
        }

        retries += 1;
        let wait = backoff.next_wait();
        tracing::warn!(
            error = %err,
            retry = retries,
            max_retries = config.max_attempts,
            wait_ms = wait.as_millis(),
            "Fetch failed, retrying"
        );
        tokio::time::sleep(wait).await;
    }
}

/// Delay schedule of one retried fetch
struct Backoff<'a> {
    config: &'a RetryConfig,
    /// Base delay of the next wait, before jitter
    next: Duration,
}

impl<'a> Backoff<'a> {
    fn new(config: &'a RetryConfig) -> Self {
        Self {
            config,
            next: config.initial_delay.min(config.max_delay),
        }
    }

    /// Wait before the upcoming retry; advances the schedule
    fn next_wait(&mut self) -> Duration {
        let base = self.next;
        self.next = scale_capped(base, self.config.backoff_multiplier, self.config.max_delay);
        if self.config.jitter {
            add_jitter(base)
        } else {
            base
        }
    }
}

/// `delay * factor`, never above `cap`
///
/// Products too large (or otherwise unrepresentable) for a `Duration` saturate at `cap`.
fn scale_capped(delay: Duration, factor: f64, cap: Duration) -> Duration {
    Duration::try_from_secs_f64(delay.as_secs_f64() * factor).map_or(cap, |d| d.min(cap))
}

/// Scale a delay by a uniform factor in `[1.0, 2.0]`
///
/// Falls back to the unscaled delay when the product does not fit a `Duration`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::try_from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor)).unwrap_or(delay)
}
