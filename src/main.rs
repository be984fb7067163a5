#[macro_use]
mod macros;

mod config;
mod constants;
mod errors;
mod handlers;
mod mcom;
mod mes;
mod middleware;
mod models;
mod openapi;
mod permissions;
mod routes;
mod services;
#[cfg(test)]
mod test_support;
mod utils;
mod validators;

use std::fmt::Display;
use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use crate::config::{Settings, CONFIG};
use crate::mcom::{DataManager, McomClient};
use crate::mes::MesClient;
use crate::middleware::{create_login_rate_limiter_config, TimeoutMiddleware};
use crate::permissions::PermissionTable;
use crate::services::{
    AccountService, CarrierService, DepartmentService, PlanService, ProduceService, ProductService,
    RecipeService, ResourceService, SiteService, StationService, UiService, WarehouseService,
    WorkOrderService,
};

fn startup_error(context: &str, err: impl Display) -> io::Error {
    io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load the service configuration before the logger so development mode can raise it
    let settings = Settings::from_file(&CONFIG.config_path)
        .map_err(|e| startup_error(&CONFIG.config_path, e))?;
    let default_filter = if settings.development_mode { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_filter));
    info!("Loaded configuration from {}", CONFIG.config_path);

    let settings = Arc::new(settings);
    let permissions = PermissionTable::from_config(&settings.permissions)
        .map_err(|e| startup_error("permissions", e))?;
    let timeout = settings.request_timeout();

    // Outbound clients
    let dm: Arc<dyn DataManager> = Arc::new(
        McomClient::new(&settings.data_manager_endpoint, timeout)
            .map_err(|e| startup_error("data manager client", e))?,
    );
    let mes = MesClient::new(timeout).map_err(|e| startup_error("MES client", e))?;
    info!("Using data manager at {}", settings.data_manager_endpoint);

    let login_limiter = create_login_rate_limiter_config()
        .ok_or_else(|| startup_error("login rate limiter", "invalid quota"))?;

    // Shared state
    let dm_data: web::Data<dyn DataManager> = web::Data::from(dm.clone());
    let settings_data = web::Data::from(settings.clone());
    let permissions = web::Data::new(permissions);
    let account_service = web::Data::new(AccountService::new(
        dm.clone(),
        settings.token_expired_in_seconds,
    ));
    let station_service = web::Data::new(StationService::new(dm.clone()));
    let site_service = web::Data::new(SiteService::new(dm.clone(), mes.clone(), settings.clone()));
    let work_order_service =
        web::Data::new(WorkOrderService::new(dm.clone(), mes.clone(), settings.clone()));
    let resource_service = web::Data::new(ResourceService::new(dm.clone()));
    let warehouse_service = web::Data::new(WarehouseService::new(dm.clone()));
    let recipe_service = web::Data::new(RecipeService::new(dm.clone()));
    let carrier_service = web::Data::new(CarrierService::new(dm.clone()));
    let plan_service = web::Data::new(PlanService::new(dm.clone()));
    let product_service = web::Data::new(ProductService::new(dm.clone()));
    let produce_service = web::Data::new(ProduceService::new(dm.clone(), mes, settings.clone()));
    let ui_service = web::Data::new(UiService::new(dm.clone()));
    let department_service = web::Data::new(DepartmentService::new(dm));

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TimeoutMiddleware::new(timeout))
            .wrap(Logger::default())
            .app_data(dm_data.clone())
            .app_data(settings_data.clone())
            .app_data(permissions.clone())
            .app_data(account_service.clone())
            .app_data(station_service.clone())
            .app_data(site_service.clone())
            .app_data(work_order_service.clone())
            .app_data(resource_service.clone())
            .app_data(warehouse_service.clone())
            .app_data(recipe_service.clone())
            .app_data(carrier_service.clone())
            .app_data(plan_service.clone())
            .app_data(product_service.clone())
            .app_data(produce_service.clone())
            .app_data(ui_service.clone())
            .app_data(department_service.clone())
            .configure(|cfg| routes::configure_routes(cfg, &login_limiter))
    })
    .bind(&server_addr)?
    .run()
    .await
}
