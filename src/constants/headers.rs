//! Header names used by the API and by outbound calls.

/// Carries the session token issued at login.
pub const AUTH_KEY_HEADER: &str = "x-mui-auth-key";

/// Optional client supplied tracking ID, forwarded to the MES as `pid`.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
