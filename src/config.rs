//! Configuration types for rickmorty-feed

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Character catalog API settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, without the `/character` path
    /// (default: "https://rickandmortyapi.com/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout covering connect, send and body read (default: 30 seconds)
    ///
    /// Serialized as whole seconds, so sub-second values do not survive a round trip
    /// (500ms is written as `0`, which fails validation when read back).
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Retry configuration for transient fetch failures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try (default: 2)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    ///
    /// Like the other durations here, serialized as whole seconds.
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 10 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl RetryConfig {
    /// A configuration that never retries
    pub fn disabled() -> Self {
        Self {
            max_attempts: 0,
            ..Self::default()
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Feed state machine settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Capacity of the snapshot broadcast channel (default: 64)
    ///
    /// A subscriber that falls further behind than this receives `RecvError::Lagged`.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            event_buffer: default_event_buffer(),
        }
    }
}

/// Main configuration
///
/// - [`api`](ApiConfig): where and how to reach the catalog
/// - [`retry`](RetryConfig): backoff for transient failures
/// - [`feed`](FeedConfig): state machine settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Retry settings
    #[serde(default)]
    pub retry: RetryConfig,

    /// Feed settings
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Config {
    /// Read a JSON configuration file and validate it
    ///
    /// Missing fields take their defaults, so `{}` is a valid file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid JSON, or fails
    /// [`validate`](Self::validate)
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), base_url = %config.api.base_url, "Loaded configuration");
        Ok(config)
    }

    /// Check that every setting is usable
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first offending key
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(Error::config("base URL must not be empty", "api.base_url"));
        }
        let parsed = url::Url::parse(base_url).map_err(|e| {
            Error::config(format!("base URL is not a valid URL: {e}"), "api.base_url")
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(
                format!("unsupported URL scheme '{}'", parsed.scheme()),
                "api.base_url",
            ));
        }
        if self.api.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than 0", "api.timeout"));
        }
        let multiplier = self.retry.backoff_multiplier;
        if !(1.0..=MAX_BACKOFF_MULTIPLIER).contains(&multiplier) {
            return Err(Error::config(
                format!(
                    "backoff multiplier must be between 1.0 and {MAX_BACKOFF_MULTIPLIER}, got {multiplier}"
                ),
                "retry.backoff_multiplier",
            ));
        }
        if self.retry.max_delay > MAX_RETRY_DELAY {
            return Err(Error::config(
                format!(
                    "max retry delay must be at most {}s",
                    MAX_RETRY_DELAY.as_secs()
                ),
                "retry.max_delay",
            ));
        }
        if self.retry.initial_delay > self.retry.max_delay {
            return Err(Error::config(
                "initial retry delay must not exceed the max delay",
                "retry.initial_delay",
            ));
        }
        if self.feed.event_buffer == 0 {
            return Err(Error::config(
                "event buffer must be greater than 0",
                "feed.event_buffer",
            ));
        }
        Ok(())
    }
}

/// Largest accepted `retry.backoff_multiplier`
pub const MAX_BACKOFF_MULTIPLIER: f64 = 100.0;

/// Largest accepted `retry.max_delay`
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(3600);

fn default_base_url() -> String {
    "https://rickandmortyapi.com/api".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("rickmorty-feed/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_attempts() -> u32 {
    2
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_event_buffer() -> usize {
    64
}

fn default_true() -> bool {
    true
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
