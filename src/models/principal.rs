//! The authenticated caller of a request.

use serde::Serialize;

use crate::mcom::Role;

/// Identity resolved from the `x-mui-auth-key` token by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: String,
    pub roles: Vec<Role>,
}
