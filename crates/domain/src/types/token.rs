//! OAuth 2.0 token types
//!
//! Defines the issuance payload returned by the token endpoint and the
//! `Token` value the client holds between calls.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_TOKEN_TYPE;

/// OAuth token response from the token endpoint
///
/// Standard OAuth 2.0 token response format (RFC 6749). Fields the client
/// does not model are kept in `extra` so they survive a round trip.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

/// OAuth 2.0 credential set with an absolute expiry
///
/// The expiry is fixed once at construction from the issuance instant plus
/// the server-supplied lifetime. A token is never updated in place: a refresh
/// produces a new `Token` that replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    access_token: String,
    refresh_token: String,
    token_type: String,
    /// Absolute expiration timestamp (UTC)
    expires_at: DateTime<Utc>,
    /// Issuance fields not modeled above (scope, account info, ...)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    extra_info: Map<String, Value>,
}

impl Token {
    /// Build a token issued now.
    #[must_use]
    pub fn new(response: TokenResponse) -> Self {
        Self::from_response(response, Utc::now())
    }

    /// Build a token issued at `issued_at`.
    ///
    /// `expires_at` is exactly `issued_at + expires_in`; negative lifetimes
    /// are treated as zero. Lifetimes past the representable range saturate
    /// to `DateTime::<Utc>::MAX_UTC`.
    #[must_use]
    pub fn from_response(response: TokenResponse, issued_at: DateTime<Utc>) -> Self {
        let expires_at = Duration::try_seconds(response.expires_in.max(0))
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type,
            expires_at,
            extra_info: response.extra,
        }
    }

    /// Build a token from already-known parts, e.g. when restoring from
    /// storage.
    #[must_use]
    pub fn from_parts(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: default_token_type(),
            expires_at,
            extra_info: Map::new(),
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Raw issuance fields not captured by the typed accessors
    #[must_use]
    pub fn extra_info(&self) -> &Map<String, Value> {
        &self.extra_info
    }

    /// A token is expired once its expiry is at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl From<TokenResponse> for Token {
    fn from(response: TokenResponse) -> Self {
        Self::new(response)
    }
}
