//! Account handlers: login, logout, passwords and role assignments.

use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;
use validator::Validate;

use crate::constants::AUTH_KEY_HEADER;
use crate::errors::ApiError;
use crate::middleware::require_permission;
use crate::models::{
    ApiResponse, ChangePasswordRequest, CreateAccountRequest, LoginRequest, UpdateAccountRequest,
};
use crate::permissions::{FunctionOperationId, PermissionTable};
use crate::services::AccountService;
use crate::validators::validation_errors_to_api_error;

/// Sign in with an employee ID or an AD account
#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = "Account",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = crate::models::LoginResponse),
        (status = 400, description = "Bad credentials", body = crate::models::ErrorResponse),
        (status = 429, description = "Too many login attempts")
    )
)]
pub async fn login(
    service: web::Data<AccountService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    let reply = service.login(body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(reply)))
}

/// Sign out the token of the request
#[utoipa::path(
    post,
    path = "/api/user/logout",
    tag = "Account",
    responses((status = 200, description = "Signed out")),
    security(("api_key" = []))
)]
pub async fn logout(service: web::Data<AccountService>, req: HttpRequest) -> HttpResponse {
    let token = req
        .headers()
        .get(AUTH_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    service.logout(token).await;
    HttpResponse::Ok().finish()
}

/// Change the password of the signed-in user
#[utoipa::path(
    put,
    path = "/api/user/change-password",
    tag = "Account",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Rejected by the data manager", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn change_password(
    service: web::Data<AccountService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<ChangePasswordRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::ChangeUserPassword)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    service.change_password(&principal, body).await?;
    Ok(HttpResponse::Ok().finish())
}

/// List the roles an account may hold
#[utoipa::path(
    get,
    path = "/api/account/role-list",
    tag = "Account",
    responses(
        (status = 200, description = "Roles", body = Vec<crate::models::IdName>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn role_list(
    service: web::Data<AccountService>,
    permissions: web::Data<PermissionTable>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::GetRoleList)?;
    let roles = service.list_roles(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(roles)))
}

/// Accounts holding roles in a department
#[utoipa::path(
    get,
    path = "/api/account/authorized/department-oid/{departmentOID}",
    tag = "Account",
    params(("departmentOID" = String, Path, description = "Department OID")),
    responses(
        (status = 200, description = "Authorized accounts", body = Vec<crate::models::AuthorizedAccount>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_authorized(
    service: web::Data<AccountService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal =
        require_permission(&req, &permissions, FunctionOperationId::ListAuthorizedAccount)?;
    let department = path.into_inner();
    debug!("Listing authorized accounts of department {}", department);

    let accounts = service.list_authorized(&principal, &department).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(accounts)))
}

/// Members of a department without any role
#[utoipa::path(
    get,
    path = "/api/account/unauthorized/department-oid/{departmentOID}",
    tag = "Account",
    params(("departmentOID" = String, Path, description = "Department OID")),
    responses(
        (status = 200, description = "Unauthorized accounts", body = Vec<crate::models::UnauthorizedAccount>),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn list_unauthorized(
    service: web::Data<AccountService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal =
        require_permission(&req, &permissions, FunctionOperationId::ListUnauthorizedAccount)?;
    let accounts = service
        .list_unauthorized(&principal, &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(accounts)))
}

/// Authorize an employee with the given roles
#[utoipa::path(
    post,
    path = "/api/account/authorization",
    tag = "Account",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created"),
        (status = 400, description = "Rejected by the data manager", body = crate::models::ErrorResponse),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn create_account(
    service: web::Data<AccountService>,
    permissions: web::Data<PermissionTable>,
    body: web::Json<CreateAccountRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::CreateAccount)?;
    let body = body.into_inner();
    body.validate().map_err(validation_errors_to_api_error)?;

    service.create(&principal, body).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Change an account's roles or reset its password
#[utoipa::path(
    put,
    path = "/api/account/authorization/{employeeID}",
    tag = "Account",
    params(("employeeID" = String, Path, description = "Employee ID")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn update_account(
    service: web::Data<AccountService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    body: web::Json<UpdateAccountRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::UpdateAccount)?;
    service
        .update(&principal, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Remove an account
#[utoipa::path(
    delete,
    path = "/api/account/authorization/{employeeID}",
    tag = "Account",
    params(("employeeID" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 403, description = "Permission denied")
    ),
    security(("api_key" = []))
)]
pub async fn delete_account(
    service: web::Data<AccountService>,
    permissions: web::Data<PermissionTable>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let principal = require_permission(&req, &permissions, FunctionOperationId::DeleteAccount)?;
    service.delete(&principal, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
