//! Carrier response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::mcom::CarrierInfo;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarrierData {
    #[serde(rename = "ID")]
    pub id: String,
    pub allowed_material: String,
    pub update_at: DateTime<Utc>,
    pub update_by: String,
}

impl From<CarrierInfo> for CarrierData {
    fn from(info: CarrierInfo) -> Self {
        Self {
            id: info.id,
            allowed_material: info.allowed_material,
            update_at: info.update_at,
            update_by: info.update_by,
        }
    }
}
