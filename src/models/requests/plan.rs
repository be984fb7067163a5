//! Production plan request models.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPlanRequest {
    pub date: NaiveDate,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub product_type: String,
    #[serde(rename = "departmentOID")]
    pub department_oid: String,
    /// Decimal string
    #[schema(example = "120.5")]
    pub day_quantity: String,
}
