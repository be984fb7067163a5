pub mod auth_helpers;
pub mod auth_middleware;
pub mod rate_limiter;
pub mod request_ext;
pub mod timeout;

pub use auth_helpers::*;
pub use auth_middleware::AuthMiddleware;
pub use rate_limiter::*;
pub use request_ext::RequestExt;
pub use timeout::TimeoutMiddleware;
