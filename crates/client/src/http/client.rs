use std::sync::Arc;
use std::time::Duration;

use infusionsoft_domain::constants::DEFAULT_TIMEOUT_SECS;
use reqwest::{Client as ReqwestClient, Request};
use serde_json::{json, Map, Value};
use tracing::{debug, Level};
use url::Url;

use super::logger::HttpLogger;
use crate::errors::TransportError;

const USER_AGENT: &str = concat!("infusionsoft-rs/", env!("CARGO_PKG_VERSION"));

/// HTTP transport for token exchanges and XML-RPC calls.
///
/// One instance is built per logical operation. When a logger is attached,
/// every request/response pair is recorded to it.
#[derive(Debug, Clone)]
pub struct TransportClient {
    client: ReqwestClient,
    logger: Option<Arc<dyn HttpLogger>>,
}

impl TransportClient {
    /// Start building a new transport.
    pub fn builder() -> TransportClientBuilder {
        TransportClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    /// POST a form-encoded body and parse the JSON response.
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        basic_auth: Option<(&str, &str)>,
    ) -> Result<Value, TransportError> {
        let mut builder = self.client.post(url).form(form);
        if let Some((username, password)) = basic_auth {
            builder = builder.basic_auth(username, Some(password));
        }

        let body = self.execute(builder.build()?).await?;

        serde_json::from_slice(&body).map_err(|err| TransportError::Decode(err.to_string()))
    }

    /// POST an XML document and return the raw response body.
    pub async fn post_xml(&self, url: Url, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=UTF-8")
            .body(body)
            .build()?;

        self.execute(request).await
    }

    async fn execute(&self, request: Request) -> Result<Vec<u8>, TransportError> {
        let method = request.method().clone();
        let url = redact(request.url());
        debug!(%method, %url, "sending HTTP request");
        self.record_request(&request);

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                self.record(Level::ERROR, "HTTP request failed", |ctx| {
                    ctx.insert("error".into(), json!(err.to_string()));
                });
                return Err(err.into());
            }
        };

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%method, %url, %status, bytes = body.len(), "received HTTP response");
        self.record(Level::DEBUG, "HTTP response", |ctx| {
            ctx.insert("status".into(), json!(status.as_u16()));
            ctx.insert("body".into(), json!(String::from_utf8_lossy(&body)));
        });

        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }

    fn record_request(&self, request: &Request) {
        self.record(Level::DEBUG, "HTTP request", |ctx| {
            ctx.insert("method".into(), json!(request.method().as_str()));
            ctx.insert("url".into(), json!(request.url().as_str()));
            if let Some(body) = request.body().and_then(reqwest::Body::as_bytes) {
                ctx.insert("body".into(), json!(String::from_utf8_lossy(body)));
            }
        });
    }

    fn record(&self, level: Level, message: &str, fill: impl FnOnce(&mut Map<String, Value>)) {
        if let Some(logger) = &self.logger {
            let mut context = Map::new();
            fill(&mut context);
            logger.log(level, message, context);
        }
    }
}

/// Builder for [`TransportClient`].
#[derive(Debug)]
pub struct TransportClientBuilder {
    timeout: Duration,
    user_agent: String,
    logger: Option<Arc<dyn HttpLogger>>,
}

impl Default for TransportClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            logger: None,
        }
    }
}

impl TransportClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Attach a logger that receives every request/response pair.
    pub fn logger(mut self, logger: Option<Arc<dyn HttpLogger>>) -> Self {
        self.logger = logger;
        self
    }

    pub fn build(self) -> Result<TransportClient, TransportError> {
        let client =
            ReqwestClient::builder().timeout(self.timeout).user_agent(self.user_agent).build()?;

        Ok(TransportClient { client, logger: self.logger })
    }
}

/// Render a URL for tracing with the access token masked.
fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == "access_token") {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "access_token" { "[redacted]".into() } else { value.into_owned() };
            (key.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
