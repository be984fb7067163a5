//! Material and tool resource handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::{AddMaterialRequest, ApiResponse, SplitMaterialRequest};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::ResourceService;
use crate::validators::validation_errors_to_api_error;

/// Stock a new material resource
#[utoipa::path(
    post,
    path = "/api/resource/material/stock",
    tag = "Resource",
    request_body = AddMaterialRequest,
    responses(
        (status = 200, description = "ID of the new resource", body = crate::models::ResourceIdData),
        (status = 400, description = "Invalid quantity", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn add_material(
    service: web::Data<ResourceService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<AddMaterialRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::AddMaterial)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    let data = service.add_material(&principal, body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Material resource details
#[utoipa::path(
    get,
    path = "/api/resource/material/info/resource-id/{ID}",
    tag = "Resource",
    params(("ID" = String, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Material resources with the ID", body = Vec<crate::models::ResourceMaterialData>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_material_resource_info(
    service: web::Data<ResourceService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetMaterialResourceInfo)?;
    let data = service.material_info(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// List material statuses
#[utoipa::path(
    get,
    path = "/api/resource/material/status",
    tag = "Resource",
    responses(
        (status = 200, description = "Material statuses", body = Vec<crate::models::IdName>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_material_status(
    service: web::Data<ResourceService>,
    permissions: web::Data<PermissionTable>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListMaterialStatus)?;
    let data = service.list_material_status(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Split part of a material resource into a new one
#[utoipa::path(
    post,
    path = "/api/resource/material/split",
    tag = "Resource",
    request_body = SplitMaterialRequest,
    responses(
        (status = 200, description = "ID of the split-off resource", body = crate::models::ResourceIdData),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn split_material(
    service: web::Data<ResourceService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<SplitMaterialRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::SplitMaterial)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    let data = service.split_material(&principal, body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Tool ID of a tool resource
#[utoipa::path(
    get,
    path = "/api/production-flow/tool-resource/{toolResourceID}",
    tag = "Resource",
    params(("toolResourceID" = String, Path, description = "Tool resource ID")),
    responses(
        (status = 200, description = "Tool of the resource", body = crate::models::ToolIdData),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_tool_id(
    service: web::Data<ResourceService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetToolId)?;
    let data = service.tool_id(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::middleware::AuthMiddleware;
    use crate::test_support::{auth_header, client, dm_data, into_json, mock_login, permissions};

    #[actix_web::test]
    async fn test_material_info_shape() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetMaterialResource")
                    .json_body(json!({"resource_id": "R1"}));
                then.status(200).json_body(json!({"materials": [{
                    "material": {
                        "oid": "o1", "id": "P1", "grade": "A", "resource_id": "R1", "type": "RUBBER",
                        "status": 2, "quantity": "3.50", "unit": "kg", "lot_number": "L", "carrier_id": "C1",
                        "min_dosage": "0", "inspections": [{"id": 4, "remark": "wet"}], "remark": "",
                        "production_time": "2024-03-01T00:00:00Z", "expiry_time": "2024-04-01T00:00:00Z",
                        "created_at": "2024-03-01T00:00:00Z", "created_by": "u1",
                        "updated_at": "2024-03-02T00:00:00Z", "updated_by": "u2"
                    },
                    "warehouse": {"id": "W1", "location": "A1"}
                }]}));
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["GET_MATERIAL_RESOURCE_INFO"]))
                .app_data(web::Data::new(ResourceService::new(client(&server))))
                .service(web::scope("").wrap(AuthMiddleware).route(
                    "/resource/material/info/resource-id/{ID}",
                    web::get().to(get_material_resource_info),
                )),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/resource/material/info/resource-id/R1")
            .insert_header(auth_header())
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        let item = &body["data"][0];
        assert_eq!(item["ID"], "P1");
        assert_eq!(item["quantity"], "3.50");
        assert_eq!(item["status"], 2);
        assert_eq!(item["carrierID"], "C1");
        assert_eq!(item["inspections"], json!([{"ID": 4, "remark": "wet"}]));
        assert_eq!(item["warehouse"], json!({"ID": "W1", "location": "A1"}));
        assert_eq!(item["expiredDate"], "2024-04-01T00:00:00Z");
    }

    #[actix_web::test]
    async fn test_tool_id() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetToolResource")
                    .json_body(json!({"resource_id": "TR1"}));
                then.status(200).json_body(json!({"tool_id": "T1"}));
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["GET_TOOL_ID"]))
                .app_data(web::Data::new(ResourceService::new(client(&server))))
                .service(web::scope("").wrap(AuthMiddleware).route(
                    "/production-flow/tool-resource/{toolResourceID}",
                    web::get().to(get_tool_id),
                )),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/production-flow/tool-resource/TR1")
            .insert_header(auth_header())
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": {"toolID": "T1"}}));
    }
}
