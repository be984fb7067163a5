//! Site response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::mcom::SiteMaterial;
use crate::utils::decimal::optional_decimal_string;

#[derive(Debug, Serialize, ToSchema)]
pub struct BindMaterialData {
    pub grade: String,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub quantity: String,
    #[serde(rename = "resourceID")]
    pub resource_id: String,
}

impl From<SiteMaterial> for BindMaterialData {
    fn from(m: SiteMaterial) -> Self {
        Self {
            grade: m.grade,
            product_id: m.id,
            quantity: optional_decimal_string(m.quantity),
            resource_id: m.resource_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteInformationData {
    /// Site type name
    #[serde(rename = "type")]
    pub site_type: String,
    pub sub_type: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StationOperatorData {
    #[serde(rename = "operatorID")]
    pub operator_id: String,
}
