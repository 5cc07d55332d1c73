#![allow(dead_code)]

use std::net::TcpListener;

use chrono::{Duration, Utc};
use infusionsoft::{ClientConfig, Infusionsoft, Token};
use serde_json::json;
use wiremock::MockServer;

pub const XMLRPC_PATH: &str = "/crm/xmlrpc/v1";
pub const TOKEN_PATH: &str = "/token";

/// Client whose API and token endpoints point at `server`.
pub fn client_for(server: &MockServer) -> Infusionsoft {
    let config = ClientConfig::new("abc", "xyz", "https://app/cb")
        .with_api_url(format!("{}{XMLRPC_PATH}", server.uri()))
        .with_token_url(format!("{}{TOKEN_PATH}", server.uri()));

    Infusionsoft::new(config)
}

/// Base URL of a local port nothing listens on; connections are refused.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    format!("http://{addr}")
}

/// Client with a token valid for another hour.
pub fn authorized_client_for(server: &MockServer) -> Infusionsoft {
    let mut client = client_for(server);
    client.set_token(token_expiring_in(Duration::hours(1)));
    client
}

pub fn token_expiring_in(lifetime: Duration) -> Token {
    Token::from_parts("tok1", "ref1", Utc::now() + lifetime)
}

pub fn token_json(access: &str, refresh: &str, expires_in: i64) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "expires_in": expires_in,
        "scope": "full|abc123.infusionsoft.com"
    })
}

/// `methodResponse` with a single string value.
pub fn string_response(value: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<methodResponse>
  <params>
    <param><value><string>{value}</string></value></param>
  </params>
</methodResponse>"#
    )
}

/// `methodResponse` with an array holding one `{ Id: id }` struct.
pub fn contact_ids_response(id: i32) -> String {
    format!(
        r#"<?xml version="1.0"?>
<methodResponse>
  <params>
    <param><value><array><data>
      <value><struct>
        <member><name>Id</name><value><i4>{id}</i4></value></member>
      </struct></value>
    </data></array></value></param>
  </params>
</methodResponse>"#
    )
}

pub fn fault_response(code: i32, message: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<methodResponse>
  <fault>
    <value><struct>
      <member><name>faultCode</name><value><i4>{code}</i4></value></member>
      <member><name>faultString</name><value><string>{message}</string></value></member>
    </struct></value>
  </fault>
</methodResponse>"#
    )
}

/// Bodies of every request the server has seen, as UTF-8.
pub async fn received_bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .collect()
}
