use actix_governor::Governor;
use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::handlers;
use crate::middleware::{AuthMiddleware, LoginRateLimiterConfig};
use crate::openapi::ApiDoc;

pub fn configure_routes(cfg: &mut web::ServiceConfig, login_limiter: &LoginRateLimiterConfig) {
    cfg.service(
        web::scope("/api")
            // Login (public, rate limited)
            .service(
                web::resource("/user/login")
                    .wrap(Governor::new(login_limiter))
                    .route(web::post().to(handlers::login)),
            )
            .route("/openapi.json", web::get().to(openapi_json))
            // Everything else needs a valid token
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    // Account
                    .route("/user/logout", web::post().to(handlers::logout))
                    .route("/user/change-password", web::put().to(handlers::change_password))
                    .route("/account/role-list", web::get().to(handlers::role_list))
                    .route(
                        "/account/authorized/department-oid/{departmentOID}",
                        web::get().to(handlers::list_authorized),
                    )
                    .route(
                        "/account/unauthorized/department-oid/{departmentOID}",
                        web::get().to(handlers::list_unauthorized),
                    )
                    .route("/account/authorization", web::post().to(handlers::create_account))
                    .route(
                        "/account/authorization/{employeeID}",
                        web::put().to(handlers::update_account),
                    )
                    .route(
                        "/account/authorization/{employeeID}",
                        web::delete().to(handlers::delete_account),
                    )
                    // Station
                    .route(
                        "/station-list/department-oid/{departmentOID}",
                        web::get().to(handlers::get_station_list),
                    )
                    .route(
                        "/station/maintenance/department-oid/{departmentOID}",
                        web::get().to(handlers::list_station_info),
                    )
                    .route("/station/maintenance", web::post().to(handlers::create_station))
                    .route("/station/maintenance/{ID}", web::patch().to(handlers::update_station_info))
                    .route("/station/maintenance/{ID}", web::delete().to(handlers::delete_station))
                    .route("/station/state", web::get().to(handlers::list_station_state))
                    .route("/production-flow/station", web::get().to(handlers::list_stations))
                    .route(
                        "/production-flow/site/station/{stationID}",
                        web::get().to(handlers::list_station_sites),
                    )
                    .route("/station/{stationID}/sign-in", web::post().to(handlers::force_sign_in))
                    .route("/stations/sign-out", web::post().to(handlers::sign_out))
                    // Site
                    .route(
                        "/site/material/station/{station}/site-name/{siteName}/site-index/{siteIndex}",
                        web::get().to(handlers::list_site_materials),
                    )
                    .route("/site/type-list", web::get().to(handlers::list_site_types))
                    .route("/site/sub-type-list", web::get().to(handlers::list_site_sub_types))
                    .route(
                        "/production-flow/site/information",
                        web::post().to(handlers::get_site_information),
                    )
                    .route("/station/{stationID}/operator", web::post().to(handlers::get_station_operator))
                    .route("/site/resources/bind/auto", web::post().to(handlers::auto_bind_resource))
                    // Work order
                    .route(
                        "/schedulings/station/{station}/date/{date}",
                        web::get().to(handlers::get_station_scheduling),
                    )
                    .route("/work-orders", web::post().to(handlers::create_station_scheduling))
                    .route("/work-orders", web::put().to(handlers::update_station_scheduling))
                    .route("/work-orders/{workOrderID}", web::put().to(handlers::update_work_order))
                    .route(
                        "/work-orders/upload/department/{departmentID}",
                        web::post().to(handlers::create_work_orders_from_file),
                    )
                    .route(
                        "/production-flow/work-orders/station/{stationID}",
                        web::get().to(handlers::list_work_orders),
                    )
                    .route(
                        "/work-orders-rate/department/{departmentID}",
                        web::get().to(handlers::list_work_orders_rate),
                    )
                    .route(
                        "/production-flow/status/work-order/{workOrderID}",
                        web::put().to(handlers::change_work_order_status),
                    )
                    .route(
                        "/production-flow/work-order/{workOrderID}/information",
                        web::get().to(handlers::get_work_order_information),
                    )
                    // Resource
                    .route("/resource/material/stock", web::post().to(handlers::add_material))
                    .route(
                        "/resource/material/info/resource-id/{ID}",
                        web::get().to(handlers::get_material_resource_info),
                    )
                    .route(
                        "/resource/material/info/product-type/{productType}",
                        web::get().to(handlers::get_material_resource_info_by_type),
                    )
                    .route("/resource/material/status", web::get().to(handlers::list_material_status))
                    .route("/resource/material/split", web::post().to(handlers::split_material))
                    .route(
                        "/production-flow/tool-resource/{toolResourceID}",
                        web::get().to(handlers::get_tool_id),
                    )
                    // Warehouse
                    .route("/warehouse/resource/{ID}", web::get().to(handlers::get_warehouse_info))
                    .route("/warehouse/resource/{ID}", web::put().to(handlers::warehouse_transaction))
                    // Recipe
                    .route(
                        "/product/recipe-id/product-id/{productID}",
                        web::get().to(handlers::get_recipe_ids),
                    )
                    .route(
                        "/product/recipe-process/recipe-id/{recipeID}",
                        web::get().to(handlers::get_recipe_process_list),
                    )
                    .route(
                        "/product/active-recipes/product-id/{productID}",
                        web::get().to(handlers::get_recipe_list),
                    )
                    // Carrier
                    .route(
                        "/carrier/department-oid/{departmentOID}",
                        web::get().to(handlers::get_carrier_list),
                    )
                    .route("/carrier", web::post().to(handlers::create_carrier))
                    .route("/carrier/{ID}", web::put().to(handlers::update_carrier))
                    .route("/carrier/{ID}", web::delete().to(handlers::delete_carrier))
                    // Plan
                    .route(
                        "/plans/department-oid/{departmentOID}/product-type/{productType}/date/{date}",
                        web::get().to(handlers::get_plan_list),
                    )
                    .route("/plan", web::post().to(handlers::add_plan))
                    // Product
                    .route(
                        "/product/active-product-types/department-oid/{departmentOID}",
                        web::get().to(handlers::get_product_type_by_department_list),
                    )
                    .route(
                        "/product/active-product-types",
                        web::get().to(handlers::get_product_type_list),
                    )
                    .route(
                        "/product/active-products/product-type/{productType}",
                        web::get().to(handlers::get_product_list),
                    )
                    .route(
                        "/product/groups/department-oid/{departmentOID}/product-type/{productType}",
                        web::get().to(handlers::get_product_group_list),
                    )
                    // Produce
                    .route(
                        "/production-flow/feed-collect/work-order/{workOrderID}",
                        web::post().to(handlers::feed_collect),
                    )
                    .route("/mes/feed/station/{stationID}", web::post().to(handlers::mes_feed))
                    .route("/mes/collect/station/{stationID}", web::post().to(handlers::mes_collect))
                    // Station configuration
                    .route(
                        "/production-flow/config/station/{stationID}",
                        web::post().to(handlers::set_station_config),
                    )
                    .route(
                        "/production-flow/config/station/{stationID}",
                        web::get().to(handlers::get_station_config),
                    )
                    // Unspecified
                    .route("/department-ids", web::get().to(handlers::list_department_ids))
                    .route("/server/status", web::get().to(handlers::get_server_status)),
            ),
    );
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
