//! Station feed/collect configuration as the production flow pages edit it, and
//! product groups.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::mcom::{FeedQuantitySource, ProductGroup};
use crate::models::SiteAddress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfigData {
    #[serde(default)]
    pub product_type: Vec<String>,
    pub material_resource: bool,
    #[serde(default)]
    pub operator_sites: Vec<SiteAddress>,
    /// Feed quantity source; read only in separate mode
    #[serde(default)]
    #[schema(value_type = i32)]
    pub standard_quantity: FeedQuantitySource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CollectQuantityData {
    /// 0 takes `value`, 1 takes the quantity from station parameters
    #[serde(rename = "type")]
    pub quantity_type: i32,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectConfigData {
    pub resource: bool,
    pub carrier_resource: bool,
    pub quantity: CollectQuantityData,
    #[serde(default)]
    pub operator_sites: Vec<SiteAddress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationConfigData {
    #[serde(default)]
    pub separate_mode: bool,
    pub feed: FeedConfigData,
    pub collect: CollectConfigData,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationConfigReply {
    pub station_config: StationConfigData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductGroupData {
    pub parent: String,
    pub children: Vec<String>,
}

impl From<ProductGroup> for ProductGroupData {
    fn from(group: ProductGroup) -> Self {
        Self {
            parent: group.id,
            children: group.children,
        }
    }
}
