//! Warehouse handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::{ApiResponse, WarehouseTransactionRequest};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::WarehouseService;
use crate::validators::validation_errors_to_api_error;

/// Warehouse and location of a resource
#[utoipa::path(
    get,
    path = "/api/warehouse/resource/{ID}",
    tag = "Warehouse",
    params(("ID" = String, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Warehouse holding the resource", body = crate::models::WarehouseData),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_warehouse_info(
    service: web::Data<WarehouseService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetWarehouseInfo)?;
    let data = service.resource_warehouse(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Move a resource to another warehouse
#[utoipa::path(
    put,
    path = "/api/warehouse/resource/{ID}",
    tag = "Warehouse",
    params(("ID" = String, Path, description = "Resource ID")),
    request_body = WarehouseTransactionRequest,
    responses(
        (status = 200, description = "Resource moved"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn warehouse_transaction(
    service: web::Data<WarehouseService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<WarehouseTransactionRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::WarehouseTransaction)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    service.transfer(&principal, &path.into_inner(), body).await?;
    Ok(HttpResponse::Ok().finish())
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
    async fn test_warehouse_round() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetResourceWarehouse")
                    .json_body(json!({"resource_id": "R1"}));
                then.status(200).json_body(json!({"id": "W1", "location": "A1"}));
            })
            .await;
        let stock = server
            .mock_async(|when, then| {
                when.method(POST).path("/WarehousingStock").json_body(json!({
                    "warehouse": {"id": "W2", "location": "B2"},
                    "resource_ids": ["R1"]
                }));
                then.status(200);
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["GET_WAREHOUSE_INFO", "WAREHOUSE_TRANSACTION"]))
                .app_data(web::Data::new(WarehouseService::new(client(&server))))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/warehouse/resource/{ID}", web::get().to(get_warehouse_info))
                        .route("/warehouse/resource/{ID}", web::put().to(warehouse_transaction)),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/warehouse/resource/R1")
            .insert_header(auth_header())
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": {"warehouseID": "W1", "location": "A1"}}));

        let req = test::TestRequest::put()
            .uri("/warehouse/resource/R1")
            .insert_header(auth_header())
            .set_json(json!({"newWarehouseID": "W2", "newLocation": "B2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        stock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_transaction_requires_warehouse() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["WAREHOUSE_TRANSACTION"]))
                .app_data(web::Data::new(WarehouseService::new(client(&server))))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/warehouse/resource/{ID}", web::put().to(warehouse_transaction)),
                ),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/warehouse/resource/R1")
            .insert_header(auth_header())
            .set_json(json!({"newWarehouseID": "", "newLocation": "B2"}))
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"code": 101, "details": "newWarehouseID is required"}));
    }
}
