//! Department and server status handlers.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::ApiResponse;
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::DepartmentService;

/// List department IDs
#[utoipa::path(
    get,
    path = "/api/department-ids",
    tag = "Unspecified",
    responses(
        (status = 200, description = "Every department ID", body = Vec<crate::models::DepartmentIdData>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_department_ids(
    service: web::Data<DepartmentService>,
    permissions: web::Data<PermissionTable>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ListDepartmentIds)?;
    let data = service.department_ids(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Server liveness check
#[utoipa::path(
    get,
    path = "/api/server/status",
    tag = "Unspecified",
    responses(
        (status = 200, description = "Server is running"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_server_status(
    permissions: web::Data<PermissionTable>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_permission(&req, &permissions, FunctionOperationId::GetServerStatus)?;
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
    async fn test_department_ids() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ListAllDepartment");
                then.status(200).json_body(json!({"ids": ["D1", "D2"]}));
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["LIST_DEPARTMENT_IDS"]))
                .app_data(web::Data::new(DepartmentService::new(client(&server))))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/department-ids", web::get().to(list_department_ids)),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/department-ids")
            .insert_header(auth_header())
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": [{"departmentID": "D1"}, {"departmentID": "D2"}]}));
    }

    #[actix_web::test]
    async fn test_server_status_requires_token() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["GET_SERVER_STATUS"]))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/server/status", web::get().to(get_server_status)),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/server/status").to_request();
        let (status, _) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/server/status")
            .insert_header(auth_header())
            .to_request();
        let (status, _) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
    }
}
