//! Token authentication middleware for protected routes.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use chrono::Utc;
use futures::future::{ok, LocalBoxFuture, Ready};
use log::{debug, warn};
use std::rc::Rc;

use crate::constants::{AUTH_KEY_HEADER, ERR_INVALID_USER, ERR_TOKEN_EXPIRED};
use crate::errors::ApiError;
use crate::mcom::{CallContext, DataManager, DataManagerError, GetTokenInfoRequest};
use crate::models::Principal;
use crate::utils::log_sanitizer::mask_token;

/// Authentication middleware.
///
/// Resolves the `x-mui-auth-key` token through the data manager registered as
/// `web::Data<dyn DataManager>` and adds the [`Principal`] to the request
/// extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .headers()
                .get(AUTH_KEY_HEADER)
                .and_then(|h| h.to_str().ok())
                .unwrap_or_default()
                .to_string();

            let dm = req
                .app_data::<web::Data<dyn DataManager>>()
                .cloned()
                .ok_or_else(|| ApiError::internal("data manager is not registered"))?;

            let principal = authenticate(dm.get_ref(), &token).await?;
            debug!("Authenticated user {}", principal.id);
            req.extensions_mut().insert(principal);

            let res = service.call(req).await?;
            Ok(res)
        })
    }
}

/// Resolves a token to its principal.
pub async fn authenticate(dm: &dyn DataManager, token: &str) -> Result<Principal, ApiError> {
    let info = dm
        .get_token_info(
            &CallContext::anonymous(),
            GetTokenInfoRequest {
                token: token.to_string(),
            },
        )
        .await
        .map_err(|e| match e {
            DataManagerError::Mcom(e) => {
                warn!("Token {} rejected: {}", mask_token(token), e);
                ApiError::Unauthorized {
                    code: e.code.value(),
                    details: e.details,
                }
            }
            DataManagerError::Transport(details) => ApiError::Internal(details),
        })?;

    if !info.valid {
        warn!("Token {} is not valid", mask_token(token));
        return Err(ApiError::Unauthorized {
            code: 0,
            details: ERR_INVALID_USER.to_string(),
        });
    }

    if info.expiry_time < Utc::now() {
        return Err(ApiError::Unauthorized {
            code: 0,
            details: ERR_TOKEN_EXPIRED.to_string(),
        });
    }

    Ok(Principal {
        id: info.user,
        roles: info.roles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpRequest, HttpResponse};
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    use crate::middleware::RequestExt;
    use crate::test_support::{dm_data, into_json};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        let principal = req.get_principal().unwrap();
        HttpResponse::Ok().json(json!({"id": principal.id}))
    }

    async fn mock_token_info(server: &MockServer, status: u16, body: Value) {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetTokenInfo")
                    .json_body(json!({"token": "T"}));
                then.status(status).json_body(body);
            })
            .await;
    }

    async fn call(server: &MockServer) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new().app_data(dm_data(server)).service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header((AUTH_KEY_HEADER, "T"))
            .to_request();
        into_json(test::try_call_service(&app, req).await).await
    }

    #[actix_web::test]
    async fn test_valid_token_sets_principal() {
        let server = MockServer::start_async().await;
        mock_token_info(
            &server,
            200,
            json!({"user": "u1", "valid": true, "expiry_time": "2999-01-01T00:00:00Z", "roles": [1]}),
        )
        .await;

        let (status, body) = call(&server).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "u1");
    }

    #[actix_web::test]
    async fn test_invalid_token_is_unauthorized() {
        let server = MockServer::start_async().await;
        mock_token_info(
            &server,
            200,
            json!({"user": "u1", "valid": false, "expiry_time": "2999-01-01T00:00:00Z", "roles": []}),
        )
        .await;

        let (status, body) = call(&server).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["details"], "invalid user");
    }

    #[actix_web::test]
    async fn test_expired_token_is_unauthorized() {
        let server = MockServer::start_async().await;
        mock_token_info(
            &server,
            200,
            json!({"user": "u1", "valid": true, "expiry_time": "2000-01-01T00:00:00Z", "roles": []}),
        )
        .await;

        let (status, body) = call(&server).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["details"], "token expired");
    }

    #[actix_web::test]
    async fn test_domain_error_keeps_code() {
        let server = MockServer::start_async().await;
        mock_token_info(&server, 400, json!({"code": 200, "details": "bad account"})).await;

        let (status, body) = call(&server).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], 200);
        assert_eq!(body["details"], "bad account");
    }
}
