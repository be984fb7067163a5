//! Request extension trait for extracting the principal from HTTP requests.

use actix_web::HttpMessage;

use crate::models::Principal;

/// Extension trait for reading the caller resolved by the AuthMiddleware.
pub trait RequestExt {
    /// Returns `None` when the request did not pass through the AuthMiddleware.
    fn get_principal(&self) -> Option<Principal>;
}

impl RequestExt for actix_web::HttpRequest {
    fn get_principal(&self) -> Option<Principal> {
        self.extensions().get::<Principal>().cloned()
    }
}
