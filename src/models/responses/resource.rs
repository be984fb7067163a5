//! Material and tool resource response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::mcom::{Inspection, MaterialReply};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResourceIdData {
    #[serde(rename = "resourceID")]
    pub resource_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolIdData {
    #[serde(rename = "toolID")]
    pub tool_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InspectionData {
    #[serde(rename = "ID")]
    pub id: i32,
    pub remark: String,
}

impl From<Inspection> for InspectionData {
    fn from(i: Inspection) -> Self {
        Self {
            id: i.id,
            remark: i.remark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResourceWarehouse {
    #[serde(rename = "ID")]
    pub id: String,
    pub location: String,
}

/// A material resource with the warehouse it is stocked in.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMaterialData {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "carrierID")]
    pub carrier_id: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub expired_date: DateTime<Utc>,
    pub grade: String,
    pub inspections: Vec<InspectionData>,
    pub minimum_dosage: String,
    pub remark: String,
    pub product_type: String,
    pub quantity: String,
    pub unit: String,
    #[serde(rename = "resourceID")]
    pub resource_id: String,
    pub status: i32,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
    pub warehouse: ResourceWarehouse,
}

impl From<MaterialReply> for ResourceMaterialData {
    fn from(reply: MaterialReply) -> Self {
        let m = reply.material;
        Self {
            id: m.id,
            carrier_id: m.carrier_id,
            created_at: m.created_at,
            created_by: m.created_by,
            expired_date: m.expiry_time,
            grade: m.grade,
            inspections: m.inspections.into_iter().map(Into::into).collect(),
            minimum_dosage: m.min_dosage.to_string(),
            remark: m.remark,
            product_type: m.product_type,
            quantity: m.quantity.to_string(),
            unit: m.unit,
            resource_id: m.resource_id,
            status: m.status.value(),
            updated_at: m.updated_at,
            updated_by: m.updated_by,
            warehouse: ResourceWarehouse {
                id: reply.warehouse.id,
                location: reply.warehouse.location,
            },
        }
    }
}
