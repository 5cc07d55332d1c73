//! XML-RPC request dispatch
//!
//! - **[`codec`]**: envelope encoding/decoding via the `xmlrpc` crate
//! - **[`dispatcher`]**: token freshness check, URL/argument construction
//!   and the authenticated call itself

pub mod codec;
pub mod dispatcher;

pub use dispatcher::{Dispatcher, LegacyKey, RequestOptions};
