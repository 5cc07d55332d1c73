//! # Infusionsoft Domain
//!
//! Domain types for the Infusionsoft API client.
//!
//! This crate contains:
//! - OAuth token types (`Token`, `TokenResponse`)
//! - Client configuration (`ClientConfig`)
//! - The closed set of remote resource services (`ServiceKind`)
//! - Domain error types and Result definitions
//! - Endpoint constants
//!
//! ## Architecture
//! - No I/O and no dependencies on other workspace crates
//! - Only external dependencies allowed

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
