//! Site request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::mcom::BindType;
use crate::models::SiteAddress;

pub const RESOURCE_TYPE_MATERIAL: i32 = 0;
pub const RESOURCE_TYPE_TOOL: i32 = 1;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BindResourceItem {
    #[serde(rename = "resourceID")]
    pub resource_id: String,
    #[serde(default)]
    pub product_type: String,
    /// Quantity to bind; empty binds the whole resource
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct ForceOption {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct QueueOption {
    #[serde(default)]
    pub head: bool,
    #[serde(default)]
    pub tail: bool,
    #[serde(default)]
    pub index: u16,
}

/// Binds resources to a site, or clears it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoBindRequest {
    #[validate(length(min = 1, message = "station is required"))]
    pub station: String,
    #[validate(length(min = 1, message = "siteName is required"))]
    pub site_name: String,
    #[serde(default)]
    pub site_index: i16,
    #[schema(value_type = i32, example = 1101)]
    pub bind_type: BindType,
    /// 0 binds materials, 1 binds a tool
    #[serde(default)]
    pub resource_type: i32,
    #[serde(rename = "workOrderID", default)]
    pub work_order_id: String,
    #[serde(default)]
    pub force_bind: Option<ForceOption>,
    #[serde(default)]
    pub queue_option: Option<QueueOption>,
    #[serde(default)]
    pub resources: Vec<BindResourceItem>,
}

impl AutoBindRequest {
    pub fn is_forced(&self) -> bool {
        self.force_bind.is_some_and(|f| f.force)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SiteInformationRequest {
    pub site: SiteAddress,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMaterialPath {
    pub station: String,
    pub site_name: String,
    pub site_index: i16,
}
