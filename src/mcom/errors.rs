//! Domain errors reported by the data manager.

use serde::{Deserialize, Serialize};
use thiserror::Error;

wire_enum! {
    /// Error classification shared with the data manager.
    pub enum ErrorCode {
        Unspecified = 0 => "UNSPECIFIED",
        BadRequest = 100 => "BAD_REQUEST",
        InsufficientRequest = 101 => "INSUFFICIENT_REQUEST",
        InvalidNumber = 102 => "INVALID_NUMBER",
        AccountNotFoundOrBadPassword = 200 => "ACCOUNT_NOT_FOUND_OR_BAD_PASSWORD",
        AccountAlreadyExists = 201 => "ACCOUNT_ALREADY_EXISTS",
        ResourceNotFound = 300 => "RESOURCE_NOT_FOUND",
        ResourceExpired = 301 => "RESOURCE_EXPIRED",
        ResourceUnavailable = 302 => "RESOURCE_UNAVAILABLE",
        ResourceMaterialShortage = 303 => "RESOURCE_MATERIAL_SHORTAGE",
        ResourceExisted = 304 => "RESOURCE_EXISTED",
        ResourceSiteLimitation = 305 => "RESOURCE_SITE_LIMITATION",
        ResourceWorkorderQuantityBelowMin = 310 => "RESOURCE_WORKORDER_QUANTITY_BELOW_MIN",
        ResourceWorkorderQuantityAboveMax = 311 => "RESOURCE_WORKORDER_QUANTITY_ABOVE_MAX",
        ResourceWorkorderBadGrade = 312 => "RESOURCE_WORKORDER_BAD_GRADE",
        ResourceWorkorderResourceUnexpected = 313 => "RESOURCE_WORKORDER_RESOURCE_UNEXPECTED",
        ResourceWorkorderResourceMissing = 314 => "RESOURCE_WORKORDER_RESOURCE_MISSING",
        StationNotFound = 400 => "STATION_NOT_FOUND",
        StationSiteNotFound = 401 => "STATION_SITE_NOT_FOUND",
        StationSiteSubTypeMismatch = 402 => "STATION_SITE_SUB_TYPE_MISMATCH",
        StationWorkorderMismatch = 403 => "STATION_WORKORDER_MISMATCH",
        UserStationMismatch = 404 => "USER_STATION_MISMATCH",
        WorkorderNotFound = 500 => "WORKORDER_NOT_FOUND",
        WorkorderBadBatch = 501 => "WORKORDER_BAD_BATCH",
        WorkorderBadStatus = 502 => "WORKORDER_BAD_STATUS",
        BatchNotFound = 510 => "BATCH_NOT_FOUND",
        BatchNotReady = 511 => "BATCH_NOT_READY",
        ProcessNotFound = 600 => "PROCESS_NOT_FOUND",
        RecipeNotFound = 601 => "RECIPE_NOT_FOUND",
        LimitaryHourNotFound = 700 => "LIMITARY_HOUR_NOT_FOUND",
        CarrierNotFound = 800 => "CARRIER_NOT_FOUND",
        CarrierInUse = 801 => "CARRIER_IN_USE",
        RecordNotFound = 900 => "RECORD_NOT_FOUND",
        RecordAlreadyExists = 901 => "RECORD_ALREADY_EXISTS",
    }
}

impl ErrorCode {
    /// Maps an error code string reported by the MES agent to a data manager code.
    /// Unknown strings map to `Unspecified`.
    pub fn from_mes_code(code: &str) -> Self {
        match code {
            "Error_ERROR_BAD_REQUEST" => ErrorCode::BadRequest,
            "ERROR_RESOURCE_NOT_FOUND" => ErrorCode::ResourceNotFound,
            "ERROR_RESOURCE_EXPIRED" => ErrorCode::ResourceExpired,
            "ERROR_RESOURCE_ON_HOLD" => ErrorCode::ResourceUnavailable,
            "ERROR_WORKORDER_NOT_FOUND" => ErrorCode::WorkorderNotFound,
            "ERROR_WORKORDER_BAD_BATCH" => ErrorCode::WorkorderBadBatch,
            "ERROR_BATCH_NOT_FOUND" => ErrorCode::BatchNotFound,
            "ERROR_US_MISMATCH" => ErrorCode::UserStationMismatch,
            "ERROR_SR_SITE_NOT_FOUND" => ErrorCode::StationSiteNotFound,
            "ERROR_SW_MISMATCH" => ErrorCode::StationWorkorderMismatch,
            "ERROR_RW_QUANTITY_BELOW_MIN" => ErrorCode::ResourceWorkorderQuantityBelowMin,
            "ERROR_RW_QUANTITY_ABOVE_MAX" => ErrorCode::ResourceWorkorderQuantityAboveMax,
            "ERROR_RW_QUANTITY_SHORTAGE" => ErrorCode::ResourceMaterialShortage,
            "ERROR_RW_BAD_GRADE" => ErrorCode::ResourceWorkorderBadGrade,
            "ERROR_RW_RESOURCE_UNEXPECTED" => ErrorCode::ResourceWorkorderResourceUnexpected,
            "ERROR_RW_RESOURCE_MISSING" => ErrorCode::ResourceWorkorderResourceMissing,
            "ERROR_RESOURCE_EXISTED" => ErrorCode::ResourceExisted,
            "ERROR_CARRIER_NOT_FOUND" => ErrorCode::CarrierNotFound,
            "ERROR_CARRIER_IN_USE" => ErrorCode::CarrierInUse,
            "ERROR_BATCH_NOT_READY" => ErrorCode::BatchNotReady,
            "ERROR_WORKORDER_BAD_STATUS" => ErrorCode::WorkorderBadStatus,
            "ERROR_RECORD_EXISTED" => ErrorCode::RecordAlreadyExists,
            "ERROR_RECORD_NOT_FOUND" => ErrorCode::RecordNotFound,
            _ => ErrorCode::Unspecified,
        }
    }
}

/// A classified failure raised by the data manager, or by request validation that
/// reports in the same vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("code={code}, details={details}")]
pub struct McomError {
    pub code: ErrorCode,
    #[serde(default)]
    pub details: String,
}

impl McomError {
    pub fn new(code: ErrorCode, details: impl Into<String>) -> Self {
        Self {
            code,
            details: details.into(),
        }
    }

    pub fn code(code: ErrorCode) -> Self {
        Self::new(code, "")
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }
}

/// Failure of a data manager call: either a classified domain error or a failure of
/// the call itself.
#[derive(Debug, Error)]
pub enum DataManagerError {
    #[error(transparent)]
    Mcom(#[from] McomError),
    #[error("data manager transport error: {0}")]
    Transport(String),
}

impl DataManagerError {
    /// Returns the domain error when the failure is classified.
    pub fn as_mcom(&self) -> Option<&McomError> {
        match self {
            DataManagerError::Mcom(e) => Some(e),
            DataManagerError::Transport(_) => None,
        }
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.as_mcom().is_some_and(|e| e.is(code))
    }
}
