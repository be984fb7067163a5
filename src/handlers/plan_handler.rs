//! Production plan handlers.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::{AddPlanRequest, ApiResponse};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::PlanService;
use crate::validators::require_date;

/// Production plans of a product type on a date
#[utoipa::path(
    get,
    path = "/api/plans/department-oid/{departmentOID}/product-type/{productType}/date/{date}",
    tag = "Plan",
    params(
        ("departmentOID" = String, Path, description = "Department OID"),
        ("productType" = String, Path, description = "Product type"),
        ("date" = String, Path, description = "Plan date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Plans of the day", body = Vec<crate::models::PlanData>),
        (status = 400, description = "Malformed date", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_plan_list(
    service: web::Data<PlanService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<(String, String, String)>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetPlanList)?;
    let (department, product_type, date) = path.into_inner();
    let date = require_date(&date)?;

    let data = service.list(&principal, &department, &product_type, date).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Add a production plan
#[utoipa::path(
    post,
    path = "/api/plan",
    tag = "Plan",
    request_body = AddPlanRequest,
    responses(
        (status = 200, description = "Plan added"),
        (status = 400, description = "dayQuantity is not a number", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn add_plan(
    service: web::Data<PlanService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<AddPlanRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::AddPlan)?;
    service.add(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
