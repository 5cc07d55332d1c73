//! Domain types and models

pub mod service;
pub mod token;

pub use service::ServiceKind;
pub use token::{Token, TokenResponse};
