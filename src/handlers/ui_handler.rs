//! Production flow configuration handlers.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::{ApiResponse, SetStationConfigRequest};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::UiService;

/// Product groups of a product type
#[utoipa::path(
    get,
    path = "/api/product/groups/department-oid/{departmentOID}/product-type/{productType}",
    tag = "UI",
    params(
        ("departmentOID" = String, Path, description = "Department OID"),
        ("productType" = String, Path, description = "Product type")
    ),
    responses(
        (status = 200, description = "Product groups", body = Vec<crate::models::ProductGroupData>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_product_group_list(
    service: web::Data<UiService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetProductGroupList)?;
    let (department, product_type) = path.into_inner();
    let data = service.product_groups(&principal, &department, &product_type).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Store the feed/collect configuration of a station
#[utoipa::path(
    post,
    path = "/api/production-flow/config/station/{stationID}",
    tag = "UI",
    params(("stationID" = String, Path, description = "Station ID")),
    request_body = SetStationConfigRequest,
    responses(
        (status = 200, description = "Configuration stored"),
        (status = 400, description = "Missing operator sites or bad collect quantity", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn set_station_config(
    service: web::Data<UiService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<SetStationConfigRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::SetStationConfig)?;
    service
        .set_station_config(&principal, &path.into_inner(), body.into_inner().station_config)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Feed/collect configuration of a station
#[utoipa::path(
    get,
    path = "/api/production-flow/config/station/{stationID}",
    tag = "UI",
    params(("stationID" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Configuration, defaults when none is stored", body = crate::models::StationConfigReply),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_station_config(
    service: web::Data<UiService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetStationConfig)?;
    let data = service.station_config(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}
