//! OAuth 2.0 token exchange
//!
//! Handles the authorization-code flow against the Infusionsoft token
//! endpoint:
//! - Browser authorization URL building
//! - Authorization code exchange
//! - Token refresh (HTTP Basic client authentication)
//!
//! Exchange failures are deliberately opaque to callers; the cause is only
//! emitted to `tracing`.

use std::sync::Arc;

use infusionsoft_domain::constants::{
    GRANT_AUTHORIZATION_CODE, GRANT_REFRESH_TOKEN, RESPONSE_TYPE, SCOPE,
};
use infusionsoft_domain::{ClientConfig, InfusionsoftError, Result, Token, TokenResponse};
use tracing::{info, instrument, warn};

use crate::errors::TransportError;
use crate::http::{HttpLogger, TransportClient};

/// OAuth 2.0 client for one exchange
///
/// Borrows the session configuration and builds a fresh transport for every
/// exchange.
#[derive(Debug, Clone)]
pub struct OAuthClient<'a> {
    config: &'a ClientConfig,
    logger: Option<Arc<dyn HttpLogger>>,
}

impl<'a> OAuthClient<'a> {
    #[must_use]
    pub fn new(config: &'a ClientConfig) -> Self {
        Self { config, logger: None }
    }

    /// Record the exchange's HTTP traffic to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Option<Arc<dyn HttpLogger>>) -> Self {
        self.logger = logger;
        self
    }

    /// Generate the authorization URL the user visits in a browser.
    ///
    /// Parameter order and encoding are fixed:
    /// `client_id`, `redirect_uri`, `response_type=code`, `scope=full`.
    ///
    /// # Errors
    /// Returns `InfusionsoftError::Config` if the client id or redirect URI
    /// is missing.
    ///
    /// # Examples
    /// ```
    /// use infusionsoft::auth::OAuthClient;
    /// use infusionsoft::ClientConfig;
    ///
    /// let config = ClientConfig::new("abc", "xyz", "https://app/cb");
    /// let url = OAuthClient::new(&config).authorization_url().unwrap();
    /// assert!(url.ends_with(
    ///     "?client_id=abc&redirect_uri=https%3A%2F%2Fapp%2Fcb&response_type=code&scope=full"
    /// ));
    /// ```
    pub fn authorization_url(&self) -> Result<String> {
        let params = [
            ("client_id", self.config.require_client_id()?),
            ("redirect_uri", self.config.require_redirect_uri()?),
            ("response_type", RESPONSE_TYPE),
            ("scope", SCOPE),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", self.config.auth_url, query_string))
    }

    /// Exchange an authorization code for a token.
    ///
    /// # Errors
    /// - `InfusionsoftError::Config` if client id, secret or redirect URI is
    ///   missing (checked before any request is made)
    /// - `InfusionsoftError::AuthExchangeFailed` on any transport, status or
    ///   decoding failure
    #[instrument(skip_all)]
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let request_body = [
            ("client_id", self.config.require_client_id()?),
            ("client_secret", self.config.require_client_secret()?),
            ("code", code),
            ("grant_type", GRANT_AUTHORIZATION_CODE),
            ("redirect_uri", self.config.require_redirect_uri()?),
        ];

        match self.request_token(&request_body, None).await {
            Ok(token) => {
                info!(expires_at = %token.expires_at(), "access token acquired");
                Ok(token)
            }
            Err(err) => {
                warn!(error = %err, "authorization code exchange failed");
                Err(InfusionsoftError::AuthExchangeFailed)
            }
        }
    }

    /// Exchange a refresh token for a new token.
    ///
    /// # Errors
    /// - `InfusionsoftError::MissingToken` if `refresh_token` is empty
    /// - `InfusionsoftError::Config` if client id or secret is missing
    /// - `InfusionsoftError::RefreshFailed` on any transport, status or
    ///   decoding failure
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token> {
        if refresh_token.is_empty() {
            return Err(InfusionsoftError::MissingToken("no refresh token available".into()));
        }

        let client_id = self.config.require_client_id()?;
        let client_secret = self.config.require_client_secret()?;
        let params = [("grant_type", GRANT_REFRESH_TOKEN), ("refresh_token", refresh_token)];

        match self.request_token(&params, Some((client_id, client_secret))).await {
            Ok(token) => {
                info!(expires_at = %token.expires_at(), "access token refreshed");
                Ok(token)
            }
            Err(err) => {
                warn!(error = %err, "refresh token exchange failed");
                Err(InfusionsoftError::RefreshFailed)
            }
        }
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        basic_auth: Option<(&str, &str)>,
    ) -> std::result::Result<Token, TransportError> {
        let transport = TransportClient::builder()
            .timeout(self.config.timeout())
            .logger(self.logger.clone())
            .build()?;

        let body = transport.post_form(&self.config.token_url, form, basic_auth).await?;
        let response: TokenResponse =
            serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(Token::new(response))
    }

    /// Get a reference to the session configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.config
    }
}
