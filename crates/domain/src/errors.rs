//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Infusionsoft API operations
///
/// Every failure is surfaced once to the immediate caller. Nothing in the
/// client retries or swallows one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum InfusionsoftError {
    /// Required client settings (id, secret, redirect URI) are missing.
    /// Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The current token expired before the call was made. No request was
    /// sent; refresh and retry.
    #[error("The access token has expired")]
    TokenExpired,

    /// An operation needed a token (or a refresh token) and none was set.
    #[error("No token available: {0}")]
    MissingToken(String),

    /// Authorization-code exchange failed. Deliberately carries no detail.
    #[error("There was a problem while requesting the access token.")]
    AuthExchangeFailed,

    /// Refresh-token exchange failed. Deliberately carries no detail.
    #[error("There was a problem while requesting the refresh token.")]
    RefreshFailed,

    /// The XML-RPC call failed at the transport or protocol level.
    ///
    /// `code` is the upstream fault code, the HTTP status for non-2xx
    /// responses, or `0` when the upstream supplied none.
    #[error("Remote call failed ({code}): {message}")]
    RemoteCall { message: String, code: i32 },

    /// A service name that does not map to a known resource.
    #[error("Invalid resource: {0}")]
    InvalidResource(String),
}

impl InfusionsoftError {
    /// Upstream numeric code for remote call failures.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::RemoteCall { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True when the caller should refresh the token before retrying.
    #[must_use]
    pub fn is_token_expired(&self) -> bool {
        matches!(self, Self::TokenExpired)
    }
}

/// Result type alias for Infusionsoft operations
pub type Result<T> = std::result::Result<T, InfusionsoftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_opaque() {
        assert_eq!(
            InfusionsoftError::AuthExchangeFailed.to_string(),
            "There was a problem while requesting the access token."
        );
        assert_eq!(
            InfusionsoftError::RefreshFailed.to_string(),
            "There was a problem while requesting the refresh token."
        );
    }

    #[test]
    fn remote_call_carries_upstream_code() {
        let err =
            InfusionsoftError::RemoteCall { message: "No method matching".to_string(), code: 3 };

        assert_eq!(err.code(), Some(3));
        assert!(err.to_string().contains("No method matching"));
        assert_eq!(InfusionsoftError::TokenExpired.code(), None);
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(InfusionsoftError::Config("missing client id".into()))
            .expect("serialize");

        assert_eq!(json["type"], "Config");
        assert_eq!(json["message"], "missing client id");
    }

    #[test]
    fn token_expired_is_flagged() {
        assert!(InfusionsoftError::TokenExpired.is_token_expired());
        assert!(!InfusionsoftError::RefreshFailed.is_token_expired());
    }
}
