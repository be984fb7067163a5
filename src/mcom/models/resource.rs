use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MaterialReply, MaterialStatus, Warehouse};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMaterialResource {
    #[serde(rename = "type")]
    pub product_type: String,
    pub id: String,
    #[serde(default)]
    pub grade: String,
    pub status: MaterialStatus,
    pub quantity: Decimal,
    pub unit: String,
    pub lot_number: String,
    pub production_time: DateTime<Utc>,
    pub expiry_time: DateTime<Utc>,
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub carrier_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaterialResourcesRequest {
    pub materials: Vec<CreateMaterialResource>,
    /// Warehouse the new resources are stocked into.
    pub stock_in: Option<Warehouse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedMaterialResource {
    pub oid: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaterialResourcesReply {
    pub resources: Vec<CreatedMaterialResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitMaterialResourceRequest {
    pub resource_id: String,
    pub product_type: String,
    pub quantity: Decimal,
    pub inspection_ids: Vec<i32>,
    pub remark: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitMaterialResourceReply {
    pub new_resource_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMaterialResourceRequest {
    pub resource_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMaterialResourceReply {
    pub materials: Vec<MaterialReply>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMaterialResourceStatusReply {
    pub statuses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResourceWarehouseRequest {
    pub resource_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehousingStockRequest {
    pub warehouse: Warehouse,
    pub resource_ids: Vec<String>,
}
