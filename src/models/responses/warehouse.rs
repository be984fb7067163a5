use serde::Serialize;
use utoipa::ToSchema;

use crate::mcom::Warehouse;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WarehouseData {
    #[serde(rename = "warehouseID")]
    pub warehouse_id: String,
    pub location: String,
}

impl From<Warehouse> for WarehouseData {
    fn from(w: Warehouse) -> Self {
        Self {
            warehouse_id: w.id,
            location: w.location,
        }
    }
}
