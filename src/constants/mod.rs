//! Application constants module.
//!
//! Error details and header names shared by handlers, services and middleware.

pub mod errors;
pub mod headers;

pub use errors::*;
pub use headers::*;
