//! Transport-level error types
//!
//! These never reach callers directly: the auth exchange collapses them into
//! opaque `AuthExchangeFailed`/`RefreshFailed`, and the dispatcher turns them
//! into `RemoteCall` with an upstream code.

use infusionsoft_domain::InfusionsoftError;
use reqwest::StatusCode;
use thiserror::Error;

/// Failures raised while performing a single HTTP round trip
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout, TLS or request-building failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Upstream numeric code: the HTTP status when there is one, else `0`.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Status { status, .. } => i32::from(status.as_u16()),
            Self::Request(err) => err.status().map_or(0, |s| i32::from(s.as_u16())),
            Self::Decode(_) => 0,
        }
    }
}

impl From<TransportError> for InfusionsoftError {
    fn from(err: TransportError) -> Self {
        Self::RemoteCall { code: err.code(), message: err.to_string() }
    }
}
