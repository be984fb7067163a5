//! Authentication and authorization helper functions.
//!
//! Every gated handler starts with [`require_permission`], which answers 403 before
//! the data manager is called.

use actix_web::HttpRequest;
use log::warn;

use crate::constants::ERR_AUTH_REQUIRED;
use crate::errors::ApiError;
use crate::models::Principal;
use crate::permissions::{FunctionOperationId, PermissionTable};

use super::RequestExt;

/// Extract the principal from request or return Unauthorized error.
pub fn require_auth(req: &HttpRequest) -> Result<Principal, ApiError> {
    req.get_principal().ok_or_else(|| {
        warn!("Failed to get principal from request");
        ApiError::Unauthorized {
            code: 0,
            details: ERR_AUTH_REQUIRED.to_string(),
        }
    })
}

/// Require that one of the principal's roles may run `function`.
///
/// # Example
/// ```ignore
/// let principal = require_permission(&req, &permissions, FunctionOperationId::AddPlan)?;
/// ```
pub fn require_permission(
    req: &HttpRequest,
    permissions: &PermissionTable,
    function: FunctionOperationId,
) -> Result<Principal, ApiError> {
    let principal = require_auth(req)?;
    if !permissions.has_permission(function, &principal.roles) {
        warn!(
            "User {} is not allowed to run {}",
            principal.id,
            function.name()
        );
        return Err(ApiError::Forbidden);
    }
    Ok(principal)
}
