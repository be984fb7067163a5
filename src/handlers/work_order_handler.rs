//! Work order handlers.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::StreamExt;
use log::{debug, warn};
use validator::Validate;

use crate::constants::ERR_MISSING_UPLOAD_FILE;
use crate::errors::ApiError;
use crate::mcom::{ErrorCode, ListWorkOrdersByDurationRequest, PaginationRequest};
use crate::middleware::require_permission;
use crate::models::{
    ApiResponse, ChangeWorkOrderStatusRequest, CreateSchedulingRequest, ListOrderBody,
    UpdateSchedulingRequest, UpdateWorkOrderRequest, WorkDateQuery, WorkOrderRateQuery,
};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::WorkOrderService;
use crate::validators::{require_date, validation_errors_to_api_error};

const UPLOAD_FIELD: &str = "file";

/// Work orders scheduled on a station for a date
#[utoipa::path(
    get,
    path = "/api/schedulings/station/{station}/date/{date}",
    tag = "Work Order",
    params(
        ("station" = String, Path, description = "Station ID"),
        ("date" = String, Path, description = "Reserved date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Work orders scheduled on the station", body = Vec<crate::models::SchedulingData>),
        (status = 403, description = "Permission denied"),
        (status = 500, description = "Unreadable batch quantity plan")
    ),
    security(("api_key" = []))
)]
pub async fn get_station_scheduling(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetStationScheduling)?;
    let (station, date) = path.into_inner();
    let date = require_date(&date)?;

    let data = service.list_scheduling(&principal, &station, date).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Schedule work orders
#[utoipa::path(
    post,
    path = "/api/work-orders",
    tag = "Work Order",
    request_body = Vec<CreateSchedulingRequest>,
    responses(
        (status = 200, description = "IDs of the created work orders", body = Vec<String>),
        (status = 400, description = "Invalid batch quantities", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn create_station_scheduling(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<Vec<CreateSchedulingRequest>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::CreateStationScheduling)?;
    let body = body.into_inner();
    for item in &body {
        item.validate().map_err(validation_errors_to_api_error)?;
    }

    let ids = service.create_scheduling(&principal, body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(ids)))
}

/// Reorder or abort scheduled work orders
#[utoipa::path(
    put,
    path = "/api/work-orders",
    tag = "Work Order",
    request_body = Vec<UpdateSchedulingRequest>,
    responses(
        (status = 200, description = "Schedule updated"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn update_station_scheduling(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<Vec<UpdateSchedulingRequest>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::UpdateStationScheduling)?;
    service.update_scheduling(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Update a pending work order
#[utoipa::path(
    put,
    path = "/api/work-orders/{workOrderID}",
    tag = "Work Order",
    params(("workOrderID" = String, Path, description = "Work order ID")),
    request_body = UpdateWorkOrderRequest,
    responses(
        (status = 200, description = "Work order updated"),
        (status = 400, description = "Not pending or invalid batch plan", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn update_work_order(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<UpdateWorkOrderRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::UpdateWorkOrder)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    service.update(&principal, &path.into_inner(), body).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Open work orders of a station around a work date
#[utoipa::path(
    get,
    path = "/api/production-flow/work-orders/station/{stationID}",
    tag = "Work Order",
    params(("stationID" = String, Path, description = "Station ID"), WorkDateQuery),
    responses(
        (status = 200, description = "Open work orders of the station", body = Vec<crate::models::WorkOrderListItem>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_work_orders(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    query: web::Query<WorkDateQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListWorkOrders)?;
    let data = service.list(&principal, &path.into_inner(), query.work_date).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Completion rate of a department's work orders
#[utoipa::path(
    get,
    path = "/api/work-orders-rate/department/{departmentID}",
    tag = "Work Order",
    params(("departmentID" = String, Path, description = "Department ID"), WorkOrderRateQuery),
    request_body(content = ListOrderBody, description = "Sort order, by reserved date and sequence when absent"),
    responses(
        (status = 200, description = "Page of work order completion rates"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_work_orders_rate(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    query: web::Query<WorkOrderRateQuery>,
    body: Option<web::Json<ListOrderBody>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListWorkOrdersRate)?;
    let query = query.into_inner();
    let order_by = body
        .map(|b| b.into_inner())
        .unwrap_or_default()
        .orders_or(ListWorkOrdersByDurationRequest::reserved_order());

    let page = service
        .list_rate(
            &principal,
            &path.into_inner(),
            query.work_start_date,
            query.work_end_date,
            PaginationRequest::from_query(query.page, query.limit),
            order_by,
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(page)))
}

/// Start or close a work order
#[utoipa::path(
    put,
    path = "/api/production-flow/status/work-order/{workOrderID}",
    tag = "Work Order",
    params(("workOrderID" = String, Path, description = "Work order ID")),
    request_body = ChangeWorkOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed"),
        (status = 400, description = "Transition not allowed", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn change_work_order_status(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<ChangeWorkOrderStatusRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ChangeWorkOrderStatus)?;
    service
        .change_status(&principal, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Work order details with its recipe
#[utoipa::path(
    get,
    path = "/api/production-flow/work-order/{workOrderID}/information",
    tag = "Work Order",
    params(("workOrderID" = String, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Work order with its recipe", body = crate::models::WorkOrderInformationData),
        (status = 400, description = "Recipe step without standard value", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_work_order_information(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetWorkOrderInformation)?;
    let data = service.information(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Creates work orders from the first sheet of an uploaded workbook.
#[utoipa::path(
    post,
    path = "/api/work-orders/upload/department/{departmentID}",
    tag = "Work Order",
    params(("departmentID" = String, Path, description = "Department ID")),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Workbook in the `file` field"),
    responses(
        (status = 200, description = "Rows that failed, empty when all were created", body = crate::models::UploadWorkOrdersData),
        (status = 400, description = "Missing file or sheet", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn create_work_orders_from_file(
    service: web::Data<WorkOrderService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    payload: Multipart,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::CreateWorkOrdersFromFile)?;
    let department = path.into_inner();

    let workbook = read_upload(payload).await?;
    debug!("Received workbook of {} bytes for {}", workbook.len(), department);

    let data = service.import(&principal, &department, workbook).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Contents of the `file` field of a multipart payload.
async fn read_upload(mut payload: Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            warn!("Failed to process multipart field: {}", e);
            ApiError::mcom(ErrorCode::BadRequest, e.to_string())
        })?;

        let content_disposition = match field.content_disposition() {
            Some(cd) => cd,
            None => continue,
        };
        if content_disposition.get_name().unwrap_or("") != UPLOAD_FIELD {
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| {
                warn!("Failed to read chunk: {}", e);
                ApiError::mcom(ErrorCode::BadRequest, e.to_string())
            })?;
            bytes.extend_from_slice(&data);
        }
        return Ok(bytes);
    }
    Err(ApiError::mcom(ErrorCode::InsufficientRequest, ERR_MISSING_UPLOAD_FILE))
}
