//! Endpoint and protocol constants
//!
//! Centralized location for the production endpoints and fixed OAuth
//! parameters used by the client.

/// URL all XML-RPC requests are sent to
pub const DEFAULT_API_URL: &str = "https://api.infusionsoft.com/crm/xmlrpc/v1";

/// URL a user visits to authorize an access token
pub const DEFAULT_AUTH_URL: &str = "https://signin.infusionsoft.com/app/oauth/authorize";

/// URL used to request an access token
pub const DEFAULT_TOKEN_URL: &str = "https://api.infusionsoft.com/token";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Fixed OAuth parameters
pub const RESPONSE_TYPE: &str = "code";
pub const SCOPE: &str = "full";
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";

/// Token type assumed when the issuance response omits one
pub const DEFAULT_TOKEN_TYPE: &str = "bearer";
