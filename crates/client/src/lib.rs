//! # Infusionsoft
//!
//! Async client for the Infusionsoft CRM XML-RPC API.
//!
//! This crate contains:
//! - The [`Infusionsoft`] facade (configuration, token lifecycle, dispatch)
//! - OAuth 2.0 authorization-code and refresh exchanges ([`auth`])
//! - Authenticated XML-RPC dispatch with the legacy key argument ([`rpc`])
//! - Lazily cached resource services ([`services`])
//! - HTTP transport with optional request/response capture ([`http`])
//! - Environment/file configuration loading ([`config`])
//!
//! Tokens are never refreshed automatically: callers check
//! [`InfusionsoftError::is_token_expired`] and call
//! [`Infusionsoft::refresh_access_token`] themselves.

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod rpc;
pub mod services;

pub use client::Infusionsoft;
pub use http::{ArrayLogger, HttpLogger, LogEntry};
pub use infusionsoft_domain::{
    constants, ClientConfig, InfusionsoftError, Result, ServiceKind, Token, TokenResponse,
};
pub use rpc::{LegacyKey, RequestOptions};
pub use services::{Service, ServiceDescriptor, ServiceRegistry};
pub use xmlrpc::Value;
