use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use std::fmt;

use crate::constants::ERR_REQUEST_TIMEOUT;
use crate::mcom::{DataManagerError, ErrorCode, McomError};
use crate::mes::MesError;
use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    /// A classified domain failure; answered as 400 with its code.
    Mcom(McomError),
    Forbidden,
    Unauthorized { code: i32, details: String },
    Timeout,
    Internal(String),
    Validation(Vec<String>),
}

impl ApiError {
    pub fn mcom(code: ErrorCode, details: impl Into<String>) -> Self {
        ApiError::Mcom(McomError::new(code, details))
    }

    pub fn internal(details: impl fmt::Display) -> Self {
        ApiError::Internal(details.to_string())
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Mcom(e) => ErrorResponse::new(e.code.value(), &e.details),
            ApiError::Forbidden => ErrorResponse::new(0, "permission denied"),
            ApiError::Unauthorized { code, details } => ErrorResponse::new(*code, details),
            ApiError::Timeout => ErrorResponse::new(0, ERR_REQUEST_TIMEOUT),
            ApiError::Internal(details) => ErrorResponse::new(0, details),
            ApiError::Validation(errors) => ErrorResponse::new(
                ErrorCode::InsufficientRequest.value(),
                &errors.join("; "),
            ),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Mcom(e) => write!(f, "Bad Request [{}]: {}", e.code, e.details),
            ApiError::Forbidden => write!(f, "Forbidden"),
            ApiError::Unauthorized { code, details } => {
                write!(f, "Unauthorized [{}]: {}", code, details)
            }
            ApiError::Timeout => write!(f, "Request Timeout"),
            ApiError::Internal(details) => write!(f, "Internal Server Error: {}", details),
            ApiError::Validation(errors) => write!(f, "Validation Error: {:?}", errors),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Mcom(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(details) = self {
            error!("Internal error: {}", details);
        }
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl From<McomError> for ApiError {
    fn from(err: McomError) -> Self {
        ApiError::Mcom(err)
    }
}

impl From<DataManagerError> for ApiError {
    fn from(err: DataManagerError) -> Self {
        match err {
            DataManagerError::Mcom(e) => ApiError::Mcom(e),
            DataManagerError::Transport(details) => ApiError::Internal(details),
        }
    }
}

impl From<MesError> for ApiError {
    fn from(err: MesError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_mcom_error_is_bad_request_with_code() {
        let (status, body) =
            body_json(ApiError::mcom(ErrorCode::ResourceExpired, "resource expired, index=0"))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 301);
        assert_eq!(body["details"], "resource expired, index=0");
    }

    #[actix_web::test]
    async fn test_transport_failure_is_internal() {
        let err: ApiError = DataManagerError::Transport("connection refused".into()).into();
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 0);
    }

    #[actix_web::test]
    async fn test_status_mapping() {
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            ApiError::Unauthorized {
                code: 0,
                details: "invalid user".into()
            }
            .status_code(),
            StatusCode::UNAUTHORIZED
        );
        let (status, body) = body_json(ApiError::Validation(vec!["id is required".into()])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::InsufficientRequest.value());
    }
}
