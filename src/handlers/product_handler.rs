//! Product handlers.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::{ApiResponse, ListOrderBody, MaterialByTypeQuery, ProductListQuery, ProductTypeQuery};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::ProductService;

/// Active product types of a department
#[utoipa::path(
    get,
    path = "/api/product/active-product-types/department-oid/{departmentOID}",
    tag = "Product",
    params(("departmentOID" = String, Path, description = "Department OID")),
    responses(
        (status = 200, description = "Product types of the department", body = Vec<crate::models::ProductTypeData>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_product_type_by_department_list(
    service: web::Data<ProductService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetProductTypeList)?;
    let data = service.product_types(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Active product types
#[utoipa::path(
    get,
    path = "/api/product/active-product-types",
    tag = "Product",
    params(ProductTypeQuery),
    responses(
        (status = 200, description = "Product types", body = Vec<crate::models::ProductTypeData>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_product_type_list(
    service: web::Data<ProductService>,
    permissions: web::Data<PermissionTable>,
    query: web::Query<ProductTypeQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetProductTypeList)?;
    let department = query.into_inner().department_oid.unwrap_or_default();
    let data = service.product_types(&principal, &department).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Active product IDs of a product type
#[utoipa::path(
    get,
    path = "/api/product/active-products/product-type/{productType}",
    tag = "Product",
    params(("productType" = String, Path, description = "Product type"), ProductListQuery),
    responses(
        (status = 200, description = "Product IDs", body = Vec<String>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_product_list(
    service: web::Data<ProductService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    query: web::Query<ProductListQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetProductList)?;
    let is_last_process = query.is_last_process.unwrap_or(false);
    let data = service
        .product_ids(&principal, &path.into_inner(), is_last_process)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Material resources of a product type
#[utoipa::path(
    get,
    path = "/api/resource/material/info/product-type/{productType}",
    tag = "Product",
    params(("productType" = String, Path, description = "Product type"), MaterialByTypeQuery),
    request_body(content = ListOrderBody, description = "Sort order, by creation time when absent"),
    responses(
        (status = 200, description = "Page of material resources"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_material_resource_info_by_type(
    service: web::Data<ProductService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    query: web::Query<MaterialByTypeQuery>,
    body: Option<web::Json<ListOrderBody>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetMaterialResourceInfoByType)?;
    let order_by = body
        .map(|b| b.into_inner())
        .unwrap_or_default()
        .orders_or(ProductService::material_default_order());

    let page = service
        .materials_by_type(&principal, &path.into_inner(), query.into_inner(), order_by)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(page)))
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
    async fn test_product_list_last_process() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ListProductIDs")
                    .json_body(json!({"type": "RUBBER", "is_last_process": true}));
                then.status(200).json_body(json!({"ids": ["P1", "P2"]}));
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["GET_PRODUCT_LIST"]))
                .app_data(web::Data::new(ProductService::new(client(&server))))
                .service(web::scope("").wrap(AuthMiddleware).route(
                    "/product/active-products/product-type/{productType}",
                    web::get().to(get_product_list),
                )),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/product/active-products/product-type/RUBBER?isLastProcess=true")
            .insert_header(auth_header())
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": ["P1", "P2"]}));
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_product_types_of_department() {
        let server = MockServer::start_async().await;
        mock_login(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ListProductTypes")
                    .json_body(json!({"department_id": "D1"}));
                then.status(200).json_body(json!({"types": ["RUBBER"]}));
            })
            .await;
        let app = test::init_service(
            App::new()
                .app_data(dm_data(&server))
                .app_data(permissions(&["GET_PRODUCT_TYPE_LIST"]))
                .app_data(web::Data::new(ProductService::new(client(&server))))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .route("/product/active-product-types", web::get().to(get_product_type_list)),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/product/active-product-types?departmentOid=D1")
            .insert_header(auth_header())
            .to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": [{"type": "RUBBER"}]}));
    }
}
