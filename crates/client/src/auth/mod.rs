//! OAuth 2.0 authorization-code flow

pub mod client;

pub use client::OAuthClient;
