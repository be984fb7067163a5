//! HTTP request handlers organized by domain.

pub mod account_handler;
pub mod carrier_handler;
pub mod plan_handler;
pub mod produce_handler;
pub mod product_handler;
pub mod recipe_handler;
pub mod resource_handler;
pub mod site_handler;
pub mod station_handler;
pub mod ui_handler;
pub mod unspecified_handler;
pub mod warehouse_handler;
pub mod work_order_handler;

pub use account_handler::*;
pub use carrier_handler::*;
pub use plan_handler::*;
pub use produce_handler::*;
pub use product_handler::*;
pub use recipe_handler::*;
pub use resource_handler::*;
pub use site_handler::*;
pub use station_handler::*;
pub use ui_handler::*;
pub use unspecified_handler::*;
pub use warehouse_handler::*;
pub use work_order_handler::*;
