use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Moves a resource to another warehouse location.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseTransactionRequest {
    #[serde(rename = "newWarehouseID")]
    #[validate(length(min = 1, message = "newWarehouseID is required"))]
    pub new_warehouse_id: String,
    #[serde(default)]
    pub new_location: String,
}
