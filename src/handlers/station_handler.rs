//! Station handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;
use validator::Validate;

use crate::errors::ApiError;
use crate::mcom::{Order, PaginationRequest};
use crate::middleware::require_permission;
use crate::models::{
    ApiResponse, CreateStationRequest, DepartmentQuery, ListOrderBody, PageQuery,
    StationSignInRequest, StationSignOutRequest, UpdateStationRequest,
};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::StationService;
use crate::validators::validation_errors_to_api_error;

/// Station IDs of a department
#[utoipa::path(
    get,
    path = "/api/station-list/department-oid/{departmentOID}",
    tag = "Station",
    params(("departmentOID" = String, Path, description = "Department OID")),
    responses(
        (status = 200, description = "Station IDs", body = Vec<crate::models::StationIdItem>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_station_list(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetStationList)?;
    let stations = service.list_ids(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(stations)))
}

/// Stations of a department with their sites and bound resources
#[utoipa::path(
    get,
    path = "/api/station/maintenance/department-oid/{departmentOID}",
    tag = "Station",
    params(("departmentOID" = String, Path, description = "Department OID"), PageQuery),
    request_body(content = ListOrderBody, description = "Sort order, by ID when absent"),
    responses(
        (status = 200, description = "Page of stations"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_station_info(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    body: Option<web::Json<ListOrderBody>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListStationInfo)?;
    let department = path.into_inner();
    let order_by = body
        .map(|b| b.into_inner())
        .unwrap_or_default()
        .orders_or(vec![Order::asc("id")]);
    debug!("Listing stations of department {}", department);

    let page = service
        .list_info(
            &principal,
            &department,
            PaginationRequest::from_query(query.page, query.limit),
            order_by,
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(page)))
}

/// Create a station
#[utoipa::path(
    post,
    path = "/api/station/maintenance",
    tag = "Station",
    request_body = CreateStationRequest,
    responses(
        (status = 200, description = "Station created"),
        (status = 400, description = "Bad site action mode or rejected", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn create_station(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<CreateStationRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::CreateStation)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    service.create(&principal, body).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Update a station and add or remove its sites
#[utoipa::path(
    patch,
    path = "/api/station/maintenance/{ID}",
    tag = "Station",
    params(("ID" = String, Path, description = "Station ID")),
    request_body = UpdateStationRequest,
    responses(
        (status = 200, description = "Station updated"),
        (status = 400, description = "Bad site action mode or rejected", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn update_station_info(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<UpdateStationRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal =
        require_permission(&req, &permissions, FunctionOperationId::UpdateStationInfo)?;
    service
        .update(&principal, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Delete a station
#[utoipa::path(
    delete,
    path = "/api/station/maintenance/{ID}",
    tag = "Station",
    params(("ID" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station deleted"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn delete_station(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::DeleteStation)?;
    service.delete(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// List station states
#[utoipa::path(
    get,
    path = "/api/station/state",
    tag = "Station",
    responses(
        (status = 200, description = "Station states", body = Vec<crate::models::IdName>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_station_state(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListStationState)?;
    let states = service.list_states(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(states)))
}

/// Station IDs, optionally of one department
#[utoipa::path(
    get,
    path = "/api/production-flow/station",
    tag = "Station",
    params(DepartmentQuery),
    responses(
        (status = 200, description = "Station IDs", body = Vec<crate::models::StationListItem>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_stations(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    query: web::Query<DepartmentQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListStations)?;
    let stations = service
        .list_station_ids(&principal, &query.department_oid)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(stations)))
}

/// Sites of a station
#[utoipa::path(
    get,
    path = "/api/production-flow/site/station/{stationID}",
    tag = "Station",
    params(("stationID" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Sites of the station", body = Vec<crate::models::StationSiteItem>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_station_sites(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListStationSites)?;
    let sites = service.list_sites(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(sites)))
}

/// Sign in the caller as the operator of a station site, replacing anyone else
#[utoipa::path(
    post,
    path = "/api/station/{stationID}/sign-in",
    tag = "Station",
    params(("stationID" = String, Path, description = "Station ID")),
    request_body = StationSignInRequest,
    responses(
        (status = 200, description = "Signed in"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn force_sign_in(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<StationSignInRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal =
        require_permission(&req, &permissions, FunctionOperationId::StationForceSignIn)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    service
        .force_sign_in(&principal, &path.into_inner(), body)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Sign operators out of station sites
#[utoipa::path(
    post,
    path = "/api/stations/sign-out",
    tag = "Station",
    request_body = StationSignOutRequest,
    responses(
        (status = 200, description = "Signed out"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn sign_out(
    service: web::Data<StationService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<StationSignOutRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::StationSignOut)?;
    service.sign_out(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
