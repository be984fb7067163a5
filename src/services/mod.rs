//! Services organized by domain concern.

pub mod account_service;
pub mod carrier_service;
pub mod department_service;
pub mod plan_service;
pub mod produce_service;
pub mod product_service;
pub mod recipe_service;
pub mod resource_service;
pub mod site_service;
pub mod site_state;
pub mod station_service;
pub mod ui_service;
pub mod warehouse_service;
pub mod work_order_import;
pub mod work_order_service;

pub use account_service::AccountService;
pub use carrier_service::CarrierService;
pub use department_service::DepartmentService;
pub use plan_service::PlanService;
pub use produce_service::ProduceService;
pub use product_service::ProductService;
pub use recipe_service::RecipeService;
pub use resource_service::ResourceService;
pub use site_service::SiteService;
pub use station_service::StationService;
pub use ui_service::UiService;
pub use warehouse_service::WarehouseService;
pub use work_order_service::WorkOrderService;
