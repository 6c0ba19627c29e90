//! Error types for the request client, the key-value store and configuration.
//!
//! # Design
//! Every failure of a request attempt is reported as one `RequestError`
//! variant, so callers match on the cause instead of inspecting messages.
//! Only `HttpStatus` carries a status code and the unread response.

use std::error::Error as StdError;

use thiserror::Error;

use crate::constants::ErrorMessage;
use crate::http::RawResponse;

/// Fallback text for `RequestError::Unknown` when the underlying failure has
/// no message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Returned by `describe_error` when nothing better is available.
pub const UNDESCRIBED_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Errors returned by `RequestClient`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The call did not complete within its timeout and was aborted.
    #[error("Request timeout")]
    Timeout,

    /// The server answered with a non-2xx status. The body is left unread.
    #[error("HTTP error! status: {status}")]
    HttpStatus {
        status: u16,
        response: Box<RawResponse>,
    },

    /// The transport could not reach the server (DNS, refused connection, ...).
    #[error("Network error. Please check your connection.")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    /// A JSON body could not be produced or parsed.
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other failure.
    #[error("{message}")]
    Unknown { message: String },
}

/// The cause of a `RequestError`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    HttpStatus,
    Network,
    Serialization,
    Unknown,
}

impl RequestError {
    /// Build an `Unknown` error, substituting the fixed fallback text for an
    /// empty message.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return RequestError::Unknown {
                message: UNKNOWN_ERROR_MESSAGE.to_string(),
            };
        }
        RequestError::Unknown { message }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::Timeout => ErrorKind::Timeout,
            RequestError::HttpStatus { .. } => ErrorKind::HttpStatus,
            RequestError::Network { .. } => ErrorKind::Network,
            RequestError::Serialization(_) => ErrorKind::Serialization,
            RequestError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Present only for `HttpStatus`.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Present only for `HttpStatus`.
    pub fn raw_response(&self) -> Option<&RawResponse> {
        match self {
            RequestError::HttpStatus { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Take ownership of the unread response so its body can be consumed.
    pub fn into_raw_response(self) -> Option<RawResponse> {
        match self {
            RequestError::HttpStatus { response, .. } => Some(*response),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Timeout)
    }

    /// Text suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            RequestError::Timeout => ErrorMessage::TIMEOUT,
            RequestError::Network { .. } => ErrorMessage::NETWORK,
            RequestError::HttpStatus { status: 404, .. } => ErrorMessage::NOT_FOUND,
            _ => ErrorMessage::GENERIC,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_connect() || err.is_request() {
            RequestError::Network { source: err }
        } else {
            RequestError::unknown(err.to_string())
        }
    }
}

/// True iff `err` is a `RequestError`.
pub fn is_request_error(err: &(dyn StdError + 'static)) -> bool {
    err.is::<RequestError>()
}

/// Best-effort message for any error value. Never panics.
pub fn describe_error(err: Option<&(dyn StdError + 'static)>) -> String {
    let message = match err {
        Some(err) => match err.downcast_ref::<RequestError>() {
            Some(request_error) => request_error.message(),
            None => err.to_string(),
        },
        None => String::new(),
    };
    if message.is_empty() {
        UNDESCRIBED_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Failures of a `StorageBackend`. `KeyValueStore` never surfaces these; it
/// logs them and returns its sentinel instead.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded: needed {needed} bytes, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage data is corrupt: {0}")]
    Corrupt(String),
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timeout {value:?}: expected a positive number of milliseconds")]
    InvalidTimeout { value: String },
}
