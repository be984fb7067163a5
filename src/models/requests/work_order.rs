//! Work order request models.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Recipe process a work order runs.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderRecipe {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "processOID", default)]
    pub process_oid: String,
    #[serde(default)]
    pub process_name: String,
    #[serde(default)]
    pub process_type: String,
}

/// Batch plan shared by scheduling creation and work order edits.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchQuantityRequest {
    /// 0 quantities per batch, 1 fixed quantity, 2 plan quantity
    pub batch_size: i32,
    #[serde(default)]
    pub batch_count: i64,
    #[serde(default)]
    pub plan_quantity: String,
    #[serde(default)]
    pub batches_quantity: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedulingRequest {
    #[serde(rename = "departmentOID")]
    #[validate(length(min = 1, message = "departmentOID is required"))]
    pub department_oid: String,
    #[validate(length(min = 1, message = "station is required"))]
    pub station: String,
    #[serde(default)]
    pub recipe: WorkOrderRecipe,
    #[schema(value_type = String, format = Date)]
    pub plan_date: NaiveDate,
    #[serde(rename = "parentID", default)]
    pub parent_id: String,
    #[serde(flatten)]
    pub quantity: BatchQuantityRequest,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchedulingRequest {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub force_to_abort: bool,
    #[serde(default)]
    pub sequence: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkOrderRequest {
    #[validate(length(min = 1, message = "station is required"))]
    pub station: String,
    #[serde(default)]
    pub recipe: WorkOrderRecipe,
    #[schema(value_type = String, format = Date)]
    pub plan_date: NaiveDate,
    #[serde(flatten)]
    pub quantity: BatchQuantityRequest,
}

/// `type` 0 starts the work order, 1 closes it.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangeWorkOrderStatusRequest {
    #[serde(rename = "type")]
    pub change_type: i64,
    #[serde(default)]
    pub remark: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkDateQuery {
    #[param(value_type = String, format = Date)]
    pub work_date: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkOrderRateQuery {
    #[param(value_type = String, format = Date)]
    pub work_start_date: NaiveDate,
    #[param(value_type = String, format = Date)]
    pub work_end_date: NaiveDate,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
