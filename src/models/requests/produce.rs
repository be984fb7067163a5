//! Feed and collect request models.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::SiteAddress;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedSource {
    pub site_info: SiteAddress,
    pub quantity: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FeedSection {
    pub batch: i16,
    #[serde(default)]
    pub source: Vec<FeedSource>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectSection {
    pub work_date: NaiveDate,
    pub group: i32,
    pub quantity: f64,
    #[serde(default, rename = "resourceID")]
    pub resource_id: String,
    #[serde(default)]
    pub carrier_resource: String,
    pub sequence: i16,
    /// Accepted for compatibility; labels are not printed.
    #[serde(default)]
    pub print: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedCollectRequest {
    #[serde(rename = "stationID")]
    pub station_id: String,
    pub feed: FeedSection,
    pub collect: CollectSection,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ForceFlag {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FeedResource {
    #[serde(rename = "ID")]
    pub id: String,
    /// Ignored when the station feeds according to the recipe.
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MesFeedRequest {
    #[serde(rename = "workOrderID")]
    pub work_order_id: String,
    pub batch: i32,
    #[serde(default)]
    pub close_batch: bool,
    #[serde(default)]
    pub force_feed: ForceFlag,
    #[serde(default)]
    pub resource: Vec<FeedResource>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MesCollectRequest {
    #[serde(rename = "workOrderID")]
    pub work_order_id: String,
    pub sequence: i32,
    pub quantity: String,
    #[serde(default, rename = "resourceID")]
    pub resource_id: String,
    #[serde(default)]
    pub carrier_resource: String,
    #[serde(default)]
    pub force_collect: ForceFlag,
    #[serde(default, rename = "feedResourceIDs")]
    pub feed_resource_ids: Vec<String>,
    #[serde(default)]
    pub print: bool,
}
