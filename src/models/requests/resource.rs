//! Material and tool resource request models.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StockWarehouse {
    #[serde(rename = "ID")]
    #[validate(length(min = 1, message = "warehouse ID is required"))]
    pub id: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterialResource {
    #[validate(length(min = 1, message = "productType is required"))]
    pub product_type: String,
    #[serde(rename = "productID")]
    #[validate(length(min = 1, message = "productID is required"))]
    pub product_id: String,
    #[serde(default)]
    pub grade: String,
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub lot_number: String,
    pub production_time: DateTime<Utc>,
    pub expiry_time: DateTime<Utc>,
}

/// A material resource to create and the warehouse it is stocked in.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddMaterialRequest {
    #[validate(nested)]
    pub warehouse: StockWarehouse,
    #[validate(nested)]
    pub resource: NewMaterialResource,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SplitMaterialRequest {
    #[serde(rename = "resourceID")]
    #[validate(length(min = 1, message = "resourceID is required"))]
    pub resource_id: String,
    #[serde(default)]
    pub product_type: String,
    pub split_quantity: f64,
    #[serde(default)]
    pub inspections: Vec<i64>,
    #[serde(default)]
    pub remark: String,
}
