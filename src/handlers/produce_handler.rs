//! Feed/collect handlers.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::constants::REQUEST_ID_HEADER;
use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::{ApiResponse, FeedCollectRequest, MesCollectRequest, MesFeedRequest};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::ProduceService;

fn request_id(req: &HttpRequest) -> &str {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Feed a batch and collect its product in one step
#[utoipa::path(
    post,
    path = "/api/production-flow/feed-collect/work-order/{workOrderID}",
    tag = "Produce",
    params(("workOrderID" = String, Path, description = "Work order ID")),
    request_body = FeedCollectRequest,
    responses(
        (status = 200, description = "Batch fed and product collected"),
        (status = 400, description = "Batch in a bad status or data manager rejection", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn feed_collect(
    service: web::Data<ProduceService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<FeedCollectRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::FeedCollect)?;
    service
        .feed_collect(&principal, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Forward a feed to the MES resource API
#[utoipa::path(
    post,
    path = "/api/mes/feed/station/{stationID}",
    tag = "Produce",
    params(("stationID" = String, Path, description = "Station ID")),
    request_body = MesFeedRequest,
    responses(
        (status = 200, description = "MES verdict", body = crate::models::MesResponse),
        (status = 400, description = "Invalid feed quantity", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied"),
        (status = 500, description = "No MES configured or MES unreachable", body = crate::models::ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn mes_feed(
    service: web::Data<ProduceService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<MesFeedRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::MesFeed)?;
    let data = service
        .mes_feed(&principal, &path.into_inner(), request_id(&req), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Forward a collect to the MES resource API
#[utoipa::path(
    post,
    path = "/api/mes/collect/station/{stationID}",
    tag = "Produce",
    params(("stationID" = String, Path, description = "Station ID")),
    request_body = MesCollectRequest,
    responses(
        (status = 200, description = "MES verdict", body = crate::models::MesResponse),
        (status = 400, description = "Invalid quantity", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied"),
        (status = 500, description = "No MES configured or MES internal error", body = crate::models::ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn mes_collect(
    service: web::Data<ProduceService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<MesCollectRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::MesCollect)?;
    let data = service
        .mes_collect(&principal, &path.into_inner(), request_id(&req), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::config::Settings;
    use crate::mes::MesClient;
    use crate::middleware::AuthMiddleware;
    use crate::test_support::{auth_header, client, dm_data, into_json, mock_login, permissions};

    fn produce_service(server: &MockServer, mes_path: String) -> web::Data<ProduceService> {
        let settings = Settings {
            mes_path,
            ..Default::default()
        };
        web::Data::new(ProduceService::new(
            client(server),
            MesClient::new(None).unwrap(),
            Arc::new(settings),
        ))
    }

    #[actix_web::test]
    async fn test_mes_feed_forwards_request_id() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetStationConfiguration")
                    .json_body(json!({"station_id": "S1"}));
                then.status(200).json_body(json!({
                    "split_feed_and_collect": false,
                    "feed": {"product_types": [], "need_material_resource": true, "quantity_source": 0, "operator_sites": []},
                    "collect": {"need_collect_resource": true, "need_carrier_resource": false, "quantity_source": 0, "default_quantity": "0", "operator_sites": []}
                }));
            })
            .await;
        let mes = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/mes/api/v2/resource/feed")
                    .header("pid", "trace-1")
                    .json_body_partial(json!({"accordingRecipe": true, "feeds": [{"resource": {"id": "R1"}}]}).to_string());
                then.status(200).json_body(json!({
                    "results": [{"error": {"code": "ERROR_RESOURCE_EXPIRED", "details": "expired"}}],
                    "enforceable": true,
                    "enforceDone": false
                }));
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["MES_FEED"]))
                .app_data(produce_service(&server, server.base_url()))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/mes/feed/station/{stationID}", web::post().to(mes_feed)),
                ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/mes/feed/station/S1")
            .insert_header(auth_header())
            .insert_header((REQUEST_ID_HEADER, "trace-1"))
            .set_json(json!({
                "workOrderID": "WO1",
                "batch": 1,
                "closeBatch": false,
                "forceFeed": {"force": false},
                "resource": [{"ID": "R1", "quantity": "not used"}]
            }))
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["enableForce"], json!(true));
        assert_eq!(body["data"]["success"], json!(false));
        assert_eq!(body["data"]["error"][0]["details"], json!("expired"));
        mes.assert_async().await;
    }

    #[actix_web::test]
    async fn test_mes_collect_without_mes_path() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["MES_COLLECT"]))
                .app_data(produce_service(&server, String::new()))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/mes/collect/station/{stationID}", web::post().to(mes_collect)),
                ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/mes/collect/station/S1")
            .insert_header(auth_header())
            .set_json(json!({"workOrderID": "WO1", "sequence": 1, "quantity": "5"}))
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], json!("no mes path"));
    }

    #[actix_web::test]
    async fn test_feed_collect_forbidden() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["MES_FEED"]))
                .app_data(produce_service(&server, String::new()))
                .service(web::scope("").wrap(AuthMiddleware).route(
                    "/production-flow/feed-collect/work-order/{workOrderID}",
                    web::post().to(feed_collect),
                )),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/production-flow/feed-collect/work-order/WO1")
            .insert_header(auth_header())
            .set_json(json!({
                "stationID": "S1",
                "feed": {"batch": 1, "source": []},
                "collect": {"workDate": "2024-03-05", "group": 1, "quantity": 1.0, "sequence": 1}
            }))
            .to_request();
        let (status, _) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
