//! Generic API response models.

use serde::Serialize;
use utoipa::ToSchema;

/// Envelope of every successful body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self { data }
    }
}

/// Page of a paginated list.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedData<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T: Serialize> PaginatedData<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }
}

/// Error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric error code; zero when the failure is not classified
    #[schema(example = 301)]
    pub code: i32,
    /// Error details
    #[schema(example = "resource expired, index=0")]
    pub details: String,
}

impl ErrorResponse {
    pub fn new(code: i32, details: &str) -> Self {
        Self {
            code,
            details: details.to_string(),
        }
    }
}

/// A numeric enum value with its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IdName {
    pub id: i32,
    pub name: String,
}

impl IdName {
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl From<crate::mcom::NamedValue> for IdName {
    fn from(v: crate::mcom::NamedValue) -> Self {
        Self {
            id: v.value,
            name: v.name,
        }
    }
}
