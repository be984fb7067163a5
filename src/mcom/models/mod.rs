//! Request and reply types of the data manager operations.

mod account;
mod carrier;
mod common;
mod enums;
mod plan;
mod produce;
mod product;
mod recipe;
mod resource;
mod site;
mod station;
mod work_order;

pub use account::*;
pub use carrier::*;
pub use common::*;
pub use enums::*;
pub use plan::*;
pub use produce::*;
pub use product::*;
pub use recipe::*;
pub use resource::*;
pub use site::*;
pub use station::*;
pub use work_order::*;
