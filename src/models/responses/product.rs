//! Product response models.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductTypeData {
    #[serde(rename = "type")]
    pub product_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentIdData {
    #[serde(rename = "departmentID")]
    pub department_id: String,
}
