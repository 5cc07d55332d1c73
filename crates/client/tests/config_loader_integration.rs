//! Integration tests for configuration loader
//!
//! Loads configuration from files and drives a client built from it.

use std::io::Write;

use infusionsoft::{config, Infusionsoft};
use tempfile::NamedTempFile;

fn config_file(extension: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    file
}

#[test]
fn test_load_config_from_json_file() {
    let file = config_file(
        "json",
        r#"{
            "client_id": "abc",
            "client_secret": "xyz",
            "redirect_uri": "https://app/cb",
            "auth_url": "https://sandbox.example.com/authorize",
            "timeout_secs": 12
        }"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("json config");

    assert_eq!(config.client_id.as_deref(), Some("abc"));
    assert_eq!(config.auth_url, "https://sandbox.example.com/authorize");
    assert_eq!(config.api_url, "https://api.infusionsoft.com/crm/xmlrpc/v1");
    assert_eq!(config.timeout_secs, 12);

    let client = Infusionsoft::new(config);
    assert_eq!(
        client.authorization_url().expect("authorization url"),
        "https://sandbox.example.com/authorize\
         ?client_id=abc&redirect_uri=https%3A%2F%2Fapp%2Fcb&response_type=code&scope=full"
    );
}

#[test]
fn test_load_config_from_toml_file() {
    let file = config_file(
        "toml",
        r#"
client_id = "abc"
client_secret = "xyz"
debug = true
api_url = "http://localhost:8080/xmlrpc"
"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("toml config");

    assert!(config.debug);
    assert_eq!(config.api_url, "http://localhost:8080/xmlrpc");
    assert!(config.redirect_uri.is_none());
}

#[test]
fn test_missing_redirect_uri_surfaces_on_authorization_url() {
    let file = config_file("json", r#"{ "client_id": "abc" }"#);
    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("json config");

    let result = Infusionsoft::new(config).authorization_url();

    assert!(matches!(result, Err(infusionsoft::InfusionsoftError::Config(_))));
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let file = config_file("yaml", "client_id: abc");

    let result = config::load_from_file(Some(file.path().to_path_buf()));

    assert!(matches!(result, Err(infusionsoft::InfusionsoftError::Config(_))));
}
