//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the client id is not set there, falls back to loading from file
//! 3. Probes a few well-known paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `INFUSIONSOFT_CLIENT_ID`: OAuth client id (required)
//! - `INFUSIONSOFT_CLIENT_SECRET`: OAuth client secret
//! - `INFUSIONSOFT_REDIRECT_URI`: OAuth redirect URI
//! - `INFUSIONSOFT_DEBUG`: Record HTTP traffic (true/false)
//! - `INFUSIONSOFT_API_URL`: XML-RPC endpoint override
//! - `INFUSIONSOFT_AUTH_URL`: Authorization endpoint override
//! - `INFUSIONSOFT_TOKEN_URL`: Token endpoint override
//! - `INFUSIONSOFT_TIMEOUT_SECS`: Request timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./infusionsoft.json` or `./infusionsoft.toml`
//! 2. `./config.json` or `./config.toml`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use infusionsoft_domain::{ClientConfig, InfusionsoftError, Result};

const CLIENT_ID_VAR: &str = "INFUSIONSOFT_CLIENT_ID";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["infusionsoft.json", "infusionsoft.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when `INFUSIONSOFT_CLIENT_ID` is set, and a
/// config file otherwise. Invalid environment values are reported as is.
///
/// # Errors
/// Returns `InfusionsoftError::Config` if:
/// - An environment value is invalid
/// - No config file is found when the environment has no client id
/// - File format is invalid
pub fn load() -> Result<ClientConfig> {
    if env_opt(CLIENT_ID_VAR).is_none() {
        tracing::debug!("{CLIENT_ID_VAR} not set, trying file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `INFUSIONSOFT_CLIENT_ID` is required; every other setting falls back
/// to its default.
///
/// # Errors
/// Returns `InfusionsoftError::Config` if the client id is missing or the
/// timeout is not a number.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::default().with_client_id(env_var(CLIENT_ID_VAR)?);

    config.client_secret = env_opt("INFUSIONSOFT_CLIENT_SECRET");
    config.redirect_uri = env_opt("INFUSIONSOFT_REDIRECT_URI");
    config.debug = env_bool("INFUSIONSOFT_DEBUG", false);

    if let Some(url) = env_opt("INFUSIONSOFT_API_URL") {
        config.api_url = url;
    }
    if let Some(url) = env_opt("INFUSIONSOFT_AUTH_URL") {
        config.auth_url = url;
    }
    if let Some(url) = env_opt("INFUSIONSOFT_TOKEN_URL") {
        config.token_url = url;
    }
    if let Some(secs) = env_opt("INFUSIONSOFT_TIMEOUT_SECS") {
        config.timeout_secs = secs
            .parse::<u64>()
            .map_err(|e| InfusionsoftError::Config(format!("Invalid timeout: {e}")))?;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected by
/// file extension.
///
/// # Errors
/// Returns `InfusionsoftError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(InfusionsoftError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            InfusionsoftError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| InfusionsoftError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| InfusionsoftError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| InfusionsoftError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(InfusionsoftError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Returns the first file that exists, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        InfusionsoftError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Set and non-empty
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
