//! Carrier request models.

use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarrierRequest {
    #[serde(rename = "departmentOID")]
    pub department_oid: String,
    pub id_prefix: String,
    pub quantity: i32,
    pub allowed_material: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarrierRequest {
    pub allowed_material: String,
}
