//! MES feed/collect reply models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::mcom::ErrorCode;
use crate::mes::CheckError;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MesErrorItem {
    pub code: i32,
    pub details: String,
}

impl From<&CheckError> for MesErrorItem {
    fn from(err: &CheckError) -> Self {
        Self {
            code: ErrorCode::from_mes_code(&err.code).value(),
            details: err.details.clone(),
        }
    }
}

/// Outcome of a feed or collect forwarded to the MES.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MesResponse {
    pub enable_force: bool,
    pub success: bool,
    pub error: Vec<MesErrorItem>,
}
