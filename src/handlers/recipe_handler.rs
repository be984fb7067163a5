//! Recipe handlers.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::ApiResponse;
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::RecipeService;

/// Recipe IDs of a product, newest first
#[utoipa::path(
    get,
    path = "/api/product/recipe-id/product-id/{productID}",
    tag = "Recipe",
    params(("productID" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Recipe IDs, newest first", body = Vec<String>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_recipe_ids(
    service: web::Data<RecipeService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetRecipeIds)?;
    let data = service.recipe_ids(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Processes of a recipe with BOMs and control tables
#[utoipa::path(
    get,
    path = "/api/product/recipe-process/recipe-id/{recipeID}",
    tag = "Recipe",
    params(("recipeID" = String, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Flows of the recipe", body = Vec<crate::models::RecipeProcessListItem>),
        (status = 400, description = "Recipe not found", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_recipe_process_list(
    service: web::Data<RecipeService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetRecipeProcessList)?;
    let data = service.process_list(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}

/// Active recipes of a product with their child recipes
#[utoipa::path(
    get,
    path = "/api/product/active-recipes/product-id/{productID}",
    tag = "Recipe",
    params(("productID" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Recipes producing the product", body = Vec<crate::models::RecipeProcessesData>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn get_recipe_list(
    service: web::Data<RecipeService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetRecipeList)?;
    let data = service.active_recipes(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(data)))
}
