//! Authenticated XML-RPC dispatch
//!
//! Wraps every remote call with the OAuth access token (as a query
//! parameter) and, for older endpoints, the legacy `key` argument.

use std::sync::Arc;

use chrono::Utc;
use infusionsoft_domain::{ClientConfig, InfusionsoftError, Result, Token};
use tracing::{debug, instrument, warn};
use url::Url;
use xmlrpc::Value;

use super::codec;
use crate::http::{HttpLogger, TransportClient};

/// Whether to prepend the legacy `key` argument to a call
///
/// Some older API methods require the key even under OAuth; some newer ones
/// break when it is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyKey {
    #[default]
    Include,
    Omit,
}

/// Per-call dispatch options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestOptions {
    pub legacy_key: LegacyKey,
}

impl RequestOptions {
    #[must_use]
    pub fn without_legacy_key() -> Self {
        Self { legacy_key: LegacyKey::Omit }
    }
}

/// Sends one authenticated XML-RPC call
#[derive(Debug, Clone)]
pub struct Dispatcher<'a> {
    config: &'a ClientConfig,
    logger: Option<Arc<dyn HttpLogger>>,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub fn new(config: &'a ClientConfig) -> Self {
        Self { config, logger: None }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Option<Arc<dyn HttpLogger>>) -> Self {
        self.logger = logger;
        self
    }

    /// Invoke `method` with `args`.
    ///
    /// The token is checked first: an expired token fails with
    /// `TokenExpired` and nothing is sent. The dispatcher never refreshes.
    ///
    /// # Errors
    /// - `InfusionsoftError::TokenExpired` if `token` expired at or before now
    /// - `InfusionsoftError::Config` if the API URL is not a valid URL
    /// - `InfusionsoftError::RemoteCall` for faults, malformed responses and
    ///   transport failures
    #[instrument(skip(self, token, args), fields(method = %method, args = args.len()))]
    pub async fn call(
        &self,
        token: &Token,
        method: &str,
        args: Vec<Value>,
        options: RequestOptions,
    ) -> Result<Value> {
        if token.is_expired_at(Utc::now()) {
            debug!(expires_at = %token.expires_at(), "refusing call with expired token");
            return Err(InfusionsoftError::TokenExpired);
        }

        let url = endpoint(&self.config.api_url, token.access_token())?;
        let args = with_legacy_key(token, args, options.legacy_key);
        let body = codec::encode_call(method, &args)?;

        let transport = TransportClient::builder()
            .timeout(self.config.timeout())
            .logger(self.logger.clone())
            .build()?;

        let response = transport.post_xml(url, body).await.map_err(|err| {
            warn!(error = %err, "XML-RPC transport failure");
            InfusionsoftError::from(err)
        })?;

        codec::decode_response(method, response).inspect_err(|err| {
            warn!(error = %err, "XML-RPC call returned an error");
        })
    }
}

/// API base URL with `access_token` appended as a query parameter.
fn endpoint(api_url: &str, access_token: &str) -> Result<Url> {
    let mut url = Url::parse(api_url)
        .map_err(|e| InfusionsoftError::Config(format!("Invalid API URL {api_url}: {e}")))?;
    url.query_pairs_mut().append_pair("access_token", access_token);
    Ok(url)
}

fn with_legacy_key(token: &Token, args: Vec<Value>, legacy_key: LegacyKey) -> Vec<Value> {
    match legacy_key {
        LegacyKey::Include => {
            let mut keyed = Vec::with_capacity(args.len() + 1);
            keyed.push(Value::from(token.access_token()));
            keyed.extend(args);
            keyed
        }
        LegacyKey::Omit => args,
    }
}
