//! HTTP transport and request/response logging

pub mod client;
pub mod logger;

pub use client::{TransportClient, TransportClientBuilder};
pub use logger::{ArrayLogger, HttpLogger, LogEntry};
