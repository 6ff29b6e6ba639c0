//! Classification of fetch failures into user-facing error kinds
//!
//! Raw failures come from wherever the fetch port gets its data: transport errors,
//! decode errors, HTTP statuses. The feed only ever shows one of the closed set of
//! [`ErrorKind`]s. [`classify`] is total: every failure maps to exactly one kind.
//!
//! # Example
//!
//! ```
//! use rickmorty_feed::classifier::{ErrorKind, classify};
//! use rickmorty_feed::Error;
//!
//! let err = Error::HttpStatus {
//!     status: 503,
//!     url: "https://rickandmortyapi.com/api/character".into(),
//!     message: None,
//! };
//! let kind = classify(&err);
//!
//! assert_eq!(kind, ErrorKind::Server { status: Some(503) });
//! assert_eq!(kind.user_message(), "Server error (Status: 503). Please try again later.");
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Message used when a failure carries no description at all
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// User-facing error taxonomy of the feed
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// Connectivity problem (offline, timeout, refused, DNS)
    Network,
    /// Server rejected the request
    Server {
        /// HTTP status code, when known
        status: Option<u16>,
    },
    /// Payload was malformed or did not match the expected schema
    Decoding,
    /// Server answered with something that is not a page
    InvalidResponse,
    /// Anything else, with a message suitable for display
    Unknown {
        /// Message shown verbatim
        message: String,
    },
}

impl ErrorKind {
    /// Message to show in the error state of the feed
    pub fn user_message(&self) -> String {
        match self {
            ErrorKind::Network => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            ErrorKind::Server {
                status: Some(status),
            } => format!("Server error (Status: {status}). Please try again later."),
            ErrorKind::Server { status: None } => {
                "Server error. Please try again later.".to_string()
            }
            ErrorKind::Decoding => "Data format error. Please try again.".to_string(),
            ErrorKind::InvalidResponse => {
                "Invalid response from server. Please try again.".to_string()
            }
            ErrorKind::Unknown { message } => message.clone(),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.user_message())
    }
}

/// What the classifier is allowed to know about a fetch failure
///
/// Implement this for any error type a [`CharacterFetcher`](crate::CharacterFetcher)
/// can produce. The crate [`Error`] implements it.
pub trait FetchFailure {
    /// Failure originated at the transport/connectivity level
    fn is_transport(&self) -> bool;

    /// Failure is a structured-data decode failure
    fn is_decode(&self) -> bool;

    /// HTTP status attached to the failure, if any
    fn http_status(&self) -> Option<u16>;

    /// Server answered but the response was not usable at all
    fn is_invalid_response(&self) -> bool {
        false
    }

    /// Human-readable description; `None` or empty when there is nothing to say
    fn description(&self) -> Option<String>;
}

/// Map a failure onto its [`ErrorKind`]
///
/// First match wins: transport, decode, HTTP status, invalid response, description,
/// then the generic message.
pub fn classify<E: FetchFailure + ?Sized>(failure: &E) -> ErrorKind {
    if failure.is_transport() {
        return ErrorKind::Network;
    }
    if failure.is_decode() {
        return ErrorKind::Decoding;
    }
    if let Some(status) = failure.http_status() {
        return ErrorKind::Server {
            status: Some(status),
        };
    }
    if failure.is_invalid_response() {
        return ErrorKind::InvalidResponse;
    }
    match failure.description() {
        Some(message) if !message.trim().is_empty() => ErrorKind::Unknown { message },
        _ => ErrorKind::Unknown {
            message: GENERIC_ERROR_MESSAGE.to_string(),
        },
    }
}

/// I/O error kinds that indicate a connectivity problem
pub(crate) fn is_transport_io(kind: std::io::ErrorKind) -> bool {
    matches!(
        kind,
        std::io::ErrorKind::TimedOut
            | std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected
            | std::io::ErrorKind::AddrNotAvailable
            | std::io::ErrorKind::BrokenPipe
    )
}

impl FetchFailure for Error {
    fn is_transport(&self) -> bool {
        match self {
            Error::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Io(e) => is_transport_io(e.kind()),
            Error::Timeout { .. } => true,
            _ => false,
        }
    }

    fn is_decode(&self) -> bool {
        match self {
            Error::Serialization(_) => true,
            Error::Network(e) => e.is_decode(),
            _ => false,
        }
    }

    fn http_status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    fn is_invalid_response(&self) -> bool {
        matches!(self, Error::InvalidResponse(_))
    }

    fn description(&self) -> Option<String> {
        let text = self.to_string();
        (!text.is_empty()).then_some(text)
    }
}
