//! Site handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::{ApiResponse, AutoBindRequest, SiteInformationRequest, SiteMaterialPath};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::SiteService;
use crate::validators::validation_errors_to_api_error;

/// Materials bound to a site
#[utoipa::path(
    get,
    path = "/api/site/material/station/{station}/site-name/{siteName}/site-index/{siteIndex}",
    tag = "Site",
    params(
        ("station" = String, Path, description = "Station ID"),
        ("siteName" = String, Path, description = "Site name"),
        ("siteIndex" = i16, Path, description = "Site index")
    ),
    responses(
        (status = 200, description = "Materials bound to the site", body = Vec<crate::models::BindMaterialData>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_site_materials(
    service: web::Data<SiteService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<SiteMaterialPath>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetSiteMaterialList)?;
    let path = path.into_inner();
    let materials = service
        .list_materials(&principal, &path.station, &path.site_name, path.site_index)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(materials)))
}

/// List site types
#[utoipa::path(
    get,
    path = "/api/site/type-list",
    tag = "Site",
    responses(
        (status = 200, description = "Site types", body = Vec<crate::models::IdName>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_site_types(
    service: web::Data<SiteService>,
    permissions: web::Data<PermissionTable>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::SiteTypeList)?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(service.list_types(&principal).await?)))
}

/// List site sub types
#[utoipa::path(
    get,
    path = "/api/site/sub-type-list",
    tag = "Site",
    responses(
        (status = 200, description = "Site sub types", body = Vec<crate::models::IdName>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_site_sub_types(
    service: web::Data<SiteService>,
    permissions: web::Data<PermissionTable>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::SiteSubtypeList)?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(service.list_sub_types(&principal).await?)))
}

/// Type and sub type of a site
#[utoipa::path(
    post,
    path = "/api/production-flow/site/information",
    tag = "Site",
    request_body = SiteInformationRequest,
    responses(
        (status = 200, description = "Type and sub type of the site", body = crate::models::SiteInformationData),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_site_information(
    service: web::Data<SiteService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<SiteInformationRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetSiteInformation)?;
    let data = service.information(&principal, body.into_inner().site).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Operator signed in to an operator slot. The site is taken from the body.
#[utoipa::path(
    post,
    path = "/api/station/{stationID}/operator",
    tag = "Site",
    params(("stationID" = String, Path, description = "Station ID")),
    request_body = SiteInformationRequest,
    responses(
        (status = 200, description = "Current operator, empty when none", body = crate::models::StationOperatorData),
        (status = 400, description = "Not an operator slot", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_station_operator(
    service: web::Data<SiteService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<SiteInformationRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetStationOperator)?;
    let data = service.operator(&principal, body.into_inner().site).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Bind resources to a site, or clear it
#[utoipa::path(
    post,
    path = "/api/site/resources/bind/auto",
    tag = "Site",
    request_body = AutoBindRequest,
    responses(
        (status = 200, description = "Resources bound"),
        (status = 400, description = "Resource rejected", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn auto_bind_resource(
    service: web::Data<SiteService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<AutoBindRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::BindResource)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    service.auto_bind(&principal, body).await?;
    Ok(HttpResponse::Ok().finish())
}
