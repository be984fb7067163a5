//! Request models for API endpoints.

pub mod account;
pub mod carrier;
pub mod plan;
pub mod produce;
pub mod product;
pub mod resource;
pub mod site;
pub mod station;
pub mod ui;
pub mod warehouse;
pub mod work_order;

pub use account::*;
pub use carrier::*;
pub use plan::*;
pub use produce::*;
pub use product::*;
pub use resource::*;
pub use site::*;
pub use station::*;
pub use ui::*;
pub use warehouse::*;
pub use work_order::*;
