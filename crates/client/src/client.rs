//! Infusionsoft API client
//!
//! [`Infusionsoft`] owns one session: the configuration, the current OAuth
//! token, the one-shot legacy-key flag and the service cache. Every
//! mutating operation takes `&mut self`; share a client across tasks only
//! behind a mutex.
//!
//! # Usage Example
//!
//! ```no_run
//! use infusionsoft::{ClientConfig, Infusionsoft, Value};
//!
//! # async fn example() -> infusionsoft::Result<()> {
//! let mut client = Infusionsoft::new(ClientConfig::new(
//!     "client_id",
//!     "client_secret",
//!     "https://example.com/callback",
//! ));
//!
//! // Send the user here, then receive `code` on the redirect URI
//! println!("{}", client.authorization_url()?);
//! client.request_access_token("code-from-redirect").await?;
//!
//! let contacts = client
//!     .contacts()
//!     .call("findByEmail", vec![Value::from("a@b.com"), Value::Array(vec![Value::from("Id")])])
//!     .await?;
//! # let _ = contacts;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use infusionsoft_domain::{ClientConfig, InfusionsoftError, Result, ServiceKind, Token};
use tracing::instrument;
use xmlrpc::Value;

use crate::auth::OAuthClient;
use crate::http::{ArrayLogger, HttpLogger, LogEntry};
use crate::rpc::{Dispatcher, LegacyKey, RequestOptions};
use crate::services::{Service, ServiceRegistry};

/// Client facade for the Infusionsoft XML-RPC API
#[derive(Debug)]
pub struct Infusionsoft {
    config: ClientConfig,
    token: Option<Token>,
    needs_legacy_key: bool,
    services: ServiceRegistry,
    http_logger: Option<Arc<dyn HttpLogger>>,
}

impl Infusionsoft {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            token: None,
            needs_legacy_key: true,
            services: ServiceRegistry::new(),
            http_logger: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_api_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.config.api_url = url.into();
        self
    }

    pub fn set_auth_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.config.auth_url = url.into();
        self
    }

    pub fn set_token_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.config.token_url = url.into();
        self
    }

    pub fn set_client_id(&mut self, client_id: impl Into<String>) -> &mut Self {
        self.config.client_id = Some(client_id.into());
        self
    }

    pub fn set_client_secret(&mut self, client_secret: impl Into<String>) -> &mut Self {
        self.config.client_secret = Some(client_secret.into());
        self
    }

    pub fn set_redirect_uri(&mut self, redirect_uri: impl Into<String>) -> &mut Self {
        self.config.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.config.debug = debug;
        self
    }

    // ------------------------------------------------------------------
    // OAuth
    // ------------------------------------------------------------------

    /// URL the user visits to authorize this client.
    ///
    /// # Errors
    /// Returns `InfusionsoftError::Config` if the client id or redirect URI
    /// is missing.
    pub fn authorization_url(&self) -> Result<String> {
        OAuthClient::new(&self.config).authorization_url()
    }

    /// Exchange an authorization code and store the resulting token.
    ///
    /// On failure the previously stored token (if any) is kept.
    ///
    /// # Errors
    /// `Config` for missing client settings, `AuthExchangeFailed` otherwise.
    #[instrument(skip_all)]
    pub async fn request_access_token(&mut self, code: &str) -> Result<&Token> {
        let logger = self.active_logger();
        let token = OAuthClient::new(&self.config).with_logger(logger).exchange_code(code).await?;

        Ok(self.token.insert(token))
    }

    /// Exchange the current refresh token and replace the stored token.
    ///
    /// On failure the previous token is kept.
    ///
    /// # Errors
    /// - `MissingToken` if no token (or no refresh token) is set; no request
    ///   is made
    /// - `Config` for missing client settings
    /// - `RefreshFailed` for any exchange failure
    #[instrument(skip_all)]
    pub async fn refresh_access_token(&mut self) -> Result<&Token> {
        let logger = self.active_logger();
        let current = self.token.as_ref().ok_or_else(|| {
            InfusionsoftError::MissingToken("cannot refresh before a token is set".into())
        })?;

        let token = OAuthClient::new(&self.config)
            .with_logger(logger)
            .refresh(current.refresh_token())
            .await?;

        Ok(self.token.insert(token))
    }

    /// Current token, for persisting between sessions.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Restore a previously persisted token, replacing any current one.
    pub fn set_token(&mut self, token: Token) -> &mut Self {
        self.token = Some(token);
        self
    }

    /// Remove and return the current token.
    pub fn clear_token(&mut self) -> Option<Token> {
        self.token.take()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Omit the legacy `key` argument from the next [`request`](Self::request)
    /// only. The flag re-arms as soon as that call is made.
    pub fn skip_legacy_key_for_next_call(&mut self) -> &mut Self {
        self.needs_legacy_key = false;
        self
    }

    /// Whether the next [`request`](Self::request) will send the legacy key.
    #[must_use]
    pub fn needs_legacy_key(&self) -> bool {
        self.needs_legacy_key
    }

    /// Invoke a remote method, honoring the one-shot legacy-key flag.
    ///
    /// The flag is consumed and re-armed before the call is attempted, so it
    /// resets whether the call succeeds or fails. Use
    /// [`request_with`](Self::request_with) to choose per call instead.
    ///
    /// # Errors
    /// - `MissingToken` if no token is set
    /// - `TokenExpired` if the token has expired; no request is made
    /// - `RemoteCall` for faults and transport failures
    pub async fn request(&mut self, method: &str, args: Vec<Value>) -> Result<Value> {
        let legacy_key = if std::mem::replace(&mut self.needs_legacy_key, true) {
            LegacyKey::Include
        } else {
            LegacyKey::Omit
        };

        self.request_with(method, args, RequestOptions { legacy_key }).await
    }

    /// Invoke a remote method with explicit per-call options. Does not touch
    /// the one-shot flag.
    ///
    /// # Errors
    /// Same as [`request`](Self::request).
    pub async fn request_with(
        &mut self,
        method: &str,
        args: Vec<Value>,
        options: RequestOptions,
    ) -> Result<Value> {
        let logger = self.active_logger();
        let token = self.token.as_ref().ok_or_else(|| {
            InfusionsoftError::MissingToken("request an access token before calling the API".into())
        })?;

        Dispatcher::new(&self.config).with_logger(logger).call(token, method, args, options).await
    }

    // ------------------------------------------------------------------
    // HTTP logging
    // ------------------------------------------------------------------

    /// The HTTP log adapter, creating the in-memory default on first use.
    pub fn http_logger(&mut self) -> Arc<dyn HttpLogger> {
        Arc::clone(self.http_logger.get_or_insert_with(|| Arc::new(ArrayLogger::new())))
    }

    pub fn set_http_logger(&mut self, logger: Arc<dyn HttpLogger>) -> &mut Self {
        self.http_logger = Some(logger);
        self
    }

    /// Recorded HTTP traffic; always empty unless debug is enabled.
    #[must_use]
    pub fn logs(&self) -> Vec<LogEntry> {
        if !self.config.debug {
            return Vec::new();
        }

        self.http_logger.as_ref().map(|logger| logger.logs()).unwrap_or_default()
    }

    fn active_logger(&mut self) -> Option<Arc<dyn HttpLogger>> {
        self.config.debug.then(|| self.http_logger())
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    /// Service handle for `kind`; the descriptor is created once per client.
    pub fn service(&mut self, kind: ServiceKind) -> Service<'_> {
        let descriptor = self.services.get(kind);
        Service::new(descriptor, self)
    }

    /// Service handle by accessor (`contacts`) or remote name
    /// (`ContactService`).
    ///
    /// # Errors
    /// Returns `InfusionsoftError::InvalidResource` for unknown names.
    pub fn service_by_name(&mut self, name: &str) -> Result<Service<'_>> {
        let kind = name.parse::<ServiceKind>()?;
        Ok(self.service(kind))
    }

    #[must_use]
    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn affiliate_programs(&mut self) -> Service<'_> {
        self.service(ServiceKind::AffiliatePrograms)
    }

    pub fn affiliates(&mut self) -> Service<'_> {
        self.service(ServiceKind::Affiliates)
    }

    pub fn contacts(&mut self) -> Service<'_> {
        self.service(ServiceKind::Contacts)
    }

    pub fn data(&mut self) -> Service<'_> {
        self.service(ServiceKind::Data)
    }

    pub fn discounts(&mut self) -> Service<'_> {
        self.service(ServiceKind::Discounts)
    }

    pub fn emails(&mut self) -> Service<'_> {
        self.service(ServiceKind::Emails)
    }

    pub fn files(&mut self) -> Service<'_> {
        self.service(ServiceKind::Files)
    }

    pub fn funnels(&mut self) -> Service<'_> {
        self.service(ServiceKind::Funnels)
    }

    pub fn invoices(&mut self) -> Service<'_> {
        self.service(ServiceKind::Invoices)
    }

    pub fn orders(&mut self) -> Service<'_> {
        self.service(ServiceKind::Orders)
    }

    pub fn products(&mut self) -> Service<'_> {
        self.service(ServiceKind::Products)
    }

    pub fn search(&mut self) -> Service<'_> {
        self.service(ServiceKind::Search)
    }

    pub fn shipping(&mut self) -> Service<'_> {
        self.service(ServiceKind::Shipping)
    }

    pub fn web_forms(&mut self) -> Service<'_> {
        self.service(ServiceKind::WebForms)
    }
}
