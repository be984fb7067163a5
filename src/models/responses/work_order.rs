//! Work order response models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderRecipeData {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "processOID")]
    pub process_oid: String,
    pub process_name: String,
    pub process_type: String,
}

/// A scheduled work order. Per-batch plans carry `batchesQuantity`, the others
/// `batchCount` and `planQuantity`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingData {
    #[serde(rename = "ID")]
    pub id: String,
    pub batch_size: i32,
    #[serde(rename = "departmentOID")]
    pub department_oid: String,
    #[schema(value_type = String, format = Date)]
    pub plan_date: NaiveDate,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub recipe: WorkOrderRecipeData,
    pub sequence: i32,
    pub station: String,
    pub status: i32,
    pub update_at: DateTime<Utc>,
    pub update_by: String,
    #[serde(rename = "parentID")]
    pub parent_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub batches_quantity: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_quantity: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderListItem {
    #[serde(rename = "workOrderID")]
    pub work_order_id: String,
    #[serde(rename = "recipeID")]
    pub recipe_id: String,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub product_type: String,
    pub work_order_status: i32,
    pub plan_quantity: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderRateData {
    #[serde(rename = "departmentID")]
    pub department_id: String,
    #[serde(rename = "workOrderID")]
    pub work_order_id: String,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub station: String,
    pub plan_quantity: String,
    pub collected_quantity: String,
    /// Completion such as `"98.50%"`
    pub ratio: String,
    pub production_time: String,
    pub production_end_time: String,
    pub update_by: String,
    pub created_by: String,
    #[serde(rename = "recipeID")]
    pub recipe_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InformationMaterial {
    #[serde(rename = "ID")]
    pub id: String,
    pub site_name: String,
    pub standard_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InformationTool {
    #[serde(rename = "ID")]
    pub id: String,
    pub necessity: bool,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct InformationRecipe {
    pub materials: Vec<InformationMaterial>,
    pub tools: Vec<InformationTool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderInformationData {
    #[serde(rename = "workOrderID")]
    pub work_order_id: String,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub product_type: String,
    #[serde(rename = "recipeID")]
    pub recipe_id: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub work_order_status: i32,
    pub collect_sequence: i32,
    pub plan_quantity: String,
    pub current_batch: i32,
    pub current_quantity: f64,
    pub recipe: InformationRecipe,
}

/// A spreadsheet row that could not be turned into a work order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FailedRow {
    /// One-based row number in the sheet
    pub index: usize,
    /// Offending columns as `letter(header)`
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadWorkOrdersData {
    pub fail_data: Vec<FailedRow>,
}
