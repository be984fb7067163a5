//! Carrier handlers.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::ApiError;
use crate::mcom::PaginationRequest;
use crate::middleware::require_permission;
use crate::models::{ApiResponse, CreateCarrierRequest, ListOrderBody, PageQuery, UpdateCarrierRequest};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::CarrierService;

/// List carriers of a department
#[utoipa::path(
    get,
    path = "/api/carrier/department-oid/{departmentOID}",
    tag = "Carrier",
    params(("departmentOID" = String, Path, description = "Department OID"), PageQuery),
    request_body(content = ListOrderBody, description = "Sort order, by ID prefix and serial number when absent"),
    responses(
        (status = 200, description = "Page of carriers"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_carrier_list(
    service: web::Data<CarrierService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    body: Option<web::Json<ListOrderBody>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListCarrier)?;
    let order_by = body
        .map(|b| b.into_inner())
        .unwrap_or_default()
        .orders_or(CarrierService::default_order());

    let page = service
        .list(
            &principal,
            &path.into_inner(),
            PaginationRequest::from_query(query.page, query.limit),
            order_by,
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(page)))
}

/// Create carriers under an ID prefix
#[utoipa::path(
    post,
    path = "/api/carrier",
    tag = "Carrier",
    request_body = CreateCarrierRequest,
    responses(
        (status = 200, description = "Carriers created"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn create_carrier(
    service: web::Data<CarrierService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<CreateCarrierRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::CreateCarrier)?;
    service.create(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Change the materials a carrier may hold
#[utoipa::path(
    put,
    path = "/api/carrier/{ID}",
    tag = "Carrier",
    params(("ID" = String, Path, description = "Carrier ID")),
    request_body = UpdateCarrierRequest,
    responses(
        (status = 200, description = "Carrier updated"),
        (status = 400, description = "Carrier not found", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn update_carrier(
    service: web::Data<CarrierService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<UpdateCarrierRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::UpdateCarrier)?;
    service.update(&principal, &path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Delete a carrier
#[utoipa::path(
    delete,
    path = "/api/carrier/{ID}",
    tag = "Carrier",
    params(("ID" = String, Path, description = "Carrier ID")),
    responses(
        (status = 200, description = "Carrier deleted"),
        (status = 400, description = "Carrier in use", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn delete_carrier(
    service: web::Data<CarrierService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::DeleteCarrier)?;
    service.delete(&principal, &path.into_inner()).await?;
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
    async fn test_list_carriers_default_order() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/ListCarriers").json_body(json!({
                    "department_id": "D1",
                    "pagination": {"page": 2, "limit": 10},
                    "order_by": [
                        {"name": "id_prefix", "descending": false},
                        {"name": "serial_number", "descending": false}
                    ]
                }));
                then.status(200).json_body(json!({
                    "info": [{
                        "id": "AB0001",
                        "allowed_material": "RUBBER",
                        "contents": ["R1"],
                        "update_by": "u1",
                        "update_at": "2024-03-01T08:00:00Z"
                    }],
                    "amount_of_data": 11
                }));
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["LIST_CARRIER"]))
                .app_data(web::Data::new(CarrierService::new(client(&server))))
                .service(web::scope("").wrap(AuthMiddleware).route(
                    "/carrier/department-oid/{departmentOID}",
                    web::get().to(get_carrier_list),
                )),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/carrier/department-oid/D1?page=2&limit=10")
            .insert_header(auth_header())
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        mock.assert_async().await;
        assert_eq!(
            body,
            json!({"data": {"items": [{
                "ID": "AB0001",
                "allowedMaterial": "RUBBER",
                "updateAt": "2024-03-01T08:00:00Z",
                "updateBy": "u1"
            }], "total": 11}})
        );
    }

    #[actix_web::test]
    async fn test_update_carrier_sends_properties() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/UpdateCarrier").json_body(json!({
                    "id": "AB0001",
                    "action": {"type": "update_properties", "allowed_material": "STEEL"}
                }));
                then.status(200);
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["UPDATE_CARRIER"]))
                .app_data(web::Data::new(CarrierService::new(client(&server))))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/carrier/{ID}", web::put().to(update_carrier)),
                ),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/carrier/AB0001")
            .insert_header(auth_header())
            .set_json(json!({"allowedMaterial": "STEEL"}))
            .to_request();
        let (status, _) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_delete_carrier_in_use() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/DeleteCarrier").json_body(json!({"id": "AB0001"}));
                then.status(400).json_body(json!({"code": 801, "details": "carrier in use"}));
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["DELETE_CARRIER"]))
                .app_data(web::Data::new(CarrierService::new(client(&server))))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/carrier/{ID}", web::delete().to(delete_carrier)),
                ),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/carrier/AB0001")
            .insert_header(auth_header())
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"code": 801, "details": "carrier in use"}));
    }
}
