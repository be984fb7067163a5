//! REST data models organized by type.

pub mod principal;
pub mod requests;
pub mod responses;

pub use principal::*;
pub use requests::*;
pub use responses::*;
