//! Error types for rickmorty-feed
//!
//! This module provides the crate-wide [`Error`] enum. Every failure the fetch port,
//! the HTTP client or the configuration layer can produce is one of its variants, which
//! lets the [`classifier`](crate::classifier) inspect failures without downcasting.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for rickmorty-feed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rickmorty-feed
///
/// Each variant carries enough context to diagnose the failure in logs. The state
/// machine never shows these to users directly; it classifies them into an
/// [`ErrorKind`](crate::classifier::ErrorKind) first.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api.base_url")
        key: Option<String>,
    },

    /// HTTP transport error (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fetch did not complete within the allowed time
    #[error("request timed out after {}ms", after.as_millis())]
    Timeout {
        /// How long the fetch was allowed to run
        after: Duration,
    },

    /// JSON payload could not be decoded into the expected shape
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL could not be built or parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Server answered with a non-success HTTP status
    #[error("server returned HTTP {status} for {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Error text from the response body, when the API supplied one
        message: Option<String>,
    },

    /// Server answered, but not with anything resembling a page
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a [`Error::Config`] tied to a specific key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_helper_records_key() {
        let err = Error::config("must not be empty", "api.base_url");

        match &err {
            Error::Config { message, key } => {
                assert_eq!(message, "must not be empty");
                assert_eq!(key.as_deref(), Some("api.base_url"));
            }
            other => panic!("expected Config, got {other:?}"),
        }
        assert_eq!(err.to_string(), "configuration error: must not be empty");
    }

    #[test]
    fn http_status_display_names_status_and_url() {
        let err = Error::HttpStatus {
            status: 404,
            url: "https://rickandmortyapi.com/api/character?page=99".into(),
            message: Some("There is nothing here".into()),
        };

        assert_eq!(
            err.to_string(),
            "server returned HTTP 404 for https://rickandmortyapi.com/api/character?page=99"
        );
    }

    #[test]
    fn timeout_display_uses_milliseconds() {
        let err = Error::Timeout {
            after: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "request timed out after 1500ms");
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn read() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }

        assert!(matches!(read(), Err(Error::Io(_))));
    }

    #[test]
    fn other_with_empty_message_displays_empty() {
        assert_eq!(Error::Other(String::new()).to_string(), "");
    }
}
