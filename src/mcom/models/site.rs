//! Sites, their bound resources and the binding operations.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    BindType, Material, MaterialReply, MaterialStatus, NamedValue, SiteId, SiteSubType, SiteType, UniqueSite,
    Warehouse,
};
use crate::mcom::{ErrorCode, McomError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSite {
    pub material: Material,
    pub quantity: Option<Decimal>,
    pub resource_id: String,
    pub product_type: String,
    pub status: MaterialStatus,
    pub expiry_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSite {
    pub resource_id: String,
    pub tool_id: String,
    pub installed_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSite {
    pub employee_id: String,
    pub group: i32,
    pub work_date: NaiveDate,
}

/// A resource bound to a site; exactly one of the fields is set for a non-empty
/// binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundResource {
    #[serde(default)]
    pub material: Option<MaterialSite>,
    #[serde(default)]
    pub tool: Option<ToolSite>,
    #[serde(default)]
    pub operator: Option<OperatorSite>,
}

impl BoundResource {
    pub fn is_empty(&self) -> bool {
        self.material.is_none() && self.tool.is_none() && self.operator.is_none()
    }
}

/// Content of a site, shaped by its type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub slot: Option<BoundResource>,
    #[serde(default)]
    pub container: Option<Vec<BoundResource>>,
    #[serde(default)]
    pub collection: Option<Vec<BoundResource>>,
    #[serde(default)]
    pub queue: Option<Vec<BoundResource>>,
    #[serde(default)]
    pub colqueue: Option<Vec<Vec<BoundResource>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAttributes {
    #[serde(rename = "type")]
    pub site_type: SiteType,
    pub sub_type: SiteSubType,
    #[serde(default)]
    pub limitation: Vec<String>,
}

impl SiteAttributes {
    /// Rejects products the site does not accept. An empty limitation accepts
    /// everything.
    pub fn limit_handler(&self, product_id: &str) -> Result<(), McomError> {
        if self.limitation.is_empty() || self.limitation.iter().any(|p| p == product_id) {
            return Ok(());
        }
        Err(McomError::new(
            ErrorCode::ResourceSiteLimitation,
            format!("product {} is not allowed on this site", product_id),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSiteRequest {
    pub station_id: String,
    pub site_name: String,
    pub site_index: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSiteReply {
    pub attributes: SiteAttributes,
    #[serde(default)]
    pub content: SiteContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSiteMaterialsRequest {
    pub station: String,
    pub site: SiteId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMaterial {
    pub id: String,
    pub grade: String,
    pub quantity: Option<Decimal>,
    pub resource_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSiteMaterialsReply {
    pub materials: Vec<SiteMaterial>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMaterialResourceIdentityRequest {
    pub resource_id: String,
    pub product_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMaterialResourceIdentitiesRequest {
    pub details: Vec<GetMaterialResourceIdentityRequest>,
}

/// One reply per requested identity, in request order; `None` when not found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMaterialResourceIdentitiesReply {
    pub replies: Vec<Option<MaterialReply>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindMaterialResource {
    pub material: Material,
    pub quantity: Option<Decimal>,
    pub resource_id: String,
    pub product_type: String,
    pub warehouse: Warehouse,
    pub status: Option<MaterialStatus>,
    pub expiry_time: Option<DateTime<Utc>>,
}

impl BindMaterialResource {
    /// A binding that only names the resource.
    pub fn id_only(resource_id: &str) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindOption {
    pub head: bool,
    pub tail: bool,
    pub index: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialBindRequestDetail {
    pub site: UniqueSite,
    #[serde(rename = "type")]
    pub bind_type: BindType,
    pub resources: Vec<BindMaterialResource>,
    pub option: BindOption,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialResourceBindRequestV2 {
    pub details: Vec<MaterialBindRequestDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResource {
    pub resource_id: String,
    pub tool_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolBindRequestDetail {
    pub site: UniqueSite,
    #[serde(rename = "type")]
    pub bind_type: BindType,
    pub resource: ToolResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResourceBindRequestV2 {
    pub details: Vec<ToolBindRequestDetail>,
}

/// Values of the site type or site sub type enumerations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSiteTypesReply {
    pub types: Vec<NamedValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetToolResourceRequest {
    pub resource_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetToolResourceReply {
    pub tool_id: String,
}
