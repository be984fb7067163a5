//! Request deadline middleware.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    rt::time::timeout,
    Error,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::warn;
use std::rc::Rc;
use std::time::Duration;

use crate::errors::ApiError;

/// Bounds every request by the configured deadline; `None` disables it.
/// An elapsed deadline answers 408.
#[derive(Clone, Copy)]
pub struct TimeoutMiddleware {
    duration: Option<Duration>,
}

impl TimeoutMiddleware {
    pub fn new(duration: Option<Duration>) -> Self {
        Self { duration }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TimeoutMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = TimeoutMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(TimeoutMiddlewareService {
            service: Rc::new(service),
            duration: self.duration,
        })
    }
}

pub struct TimeoutMiddlewareService<S> {
    service: Rc<S>,
    duration: Option<Duration>,
}

impl<S, B> Service<ServiceRequest> for TimeoutMiddlewareService<S>
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
        let duration = self.duration;

        Box::pin(async move {
            let Some(duration) = duration else {
                return service.call(req).await;
            };
            let path = req.path().to_string();
            match timeout(duration, service.call(req)).await {
                Ok(res) => res,
                Err(_) => {
                    warn!("Request {} exceeded {:?}", path, duration);
                    Err(ApiError::Timeout.into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use crate::test_support::into_json;

    async fn slow() -> HttpResponse {
        actix_web::rt::time::sleep(Duration::from_millis(200)).await;
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_elapsed_deadline_is_request_timeout() {
        let app = test::init_service(
            App::new()
                .wrap(TimeoutMiddleware::new(Some(Duration::from_millis(20))))
                .route("/slow", web::get().to(slow)),
        )
        .await;
        let req = test::TestRequest::get().uri("/slow").to_request();
        let (status, body) = into_json(test::try_call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["details"], "request timeout");
    }

    #[actix_web::test]
    async fn test_disabled_deadline_passes_through() {
        let app = test::init_service(
            App::new()
                .wrap(TimeoutMiddleware::new(None))
                .route("/slow", web::get().to(slow)),
        )
        .await;
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/slow").to_request()).await;
        assert_eq!(resp.status(), 200);
    }
}
