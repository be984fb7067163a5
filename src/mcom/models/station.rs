use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    CollectQuantitySource, FeedQuantitySource, NamedValue, Order, PaginationRequest,
    SiteActionMode, SiteContent, SiteId, SiteSubType, SiteType, StationState, UniqueSite,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationInformation {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInformation {
    pub station: String,
    pub name: String,
    pub index: i16,
    #[serde(rename = "type")]
    pub site_type: SiteType,
    pub sub_type: SiteSubType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSite {
    pub information: SiteInformation,
    #[serde(default)]
    pub content: SiteContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub administrative_department: String,
    #[serde(default)]
    pub sites: Vec<StationSite>,
    pub state: StationState,
    pub information: StationInformation,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
    pub inserted_by: String,
    pub inserted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStationRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStationsRequest {
    pub department_id: String,
    pub pagination: Option<PaginationRequest>,
    pub order_by: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStationsReply {
    pub stations: Vec<Station>,
    pub amount_of_data: i64,
}

/// Site definition used when creating or editing a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDefinition {
    pub name: String,
    pub index: i16,
    #[serde(rename = "type")]
    pub site_type: SiteType,
    pub sub_type: SiteSubType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStationRequest {
    pub id: String,
    pub department_id: String,
    pub sites: Vec<SiteDefinition>,
    pub state: StationState,
    pub information: StationInformation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStationSite {
    pub action_mode: SiteActionMode,
    pub information: SiteDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStationRequest {
    pub id: String,
    pub sites: Vec<UpdateStationSite>,
    pub state: StationState,
    pub information: StationInformation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteStationRequest {
    pub station_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStationStateReply {
    pub states: Vec<NamedValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListStationIDsRequest {
    pub department_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStationIDsReply {
    pub stations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInStationRequest {
    pub station: String,
    pub site: SiteId,
    pub group: i32,
    pub work_date: NaiveDate,
    pub force: bool,
    pub create_site_if_not_exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignOutStationsRequest {
    pub sites: Vec<UniqueSite>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedConfiguration {
    pub product_types: Vec<String>,
    pub need_material_resource: bool,
    pub quantity_source: FeedQuantitySource,
    pub operator_sites: Vec<UniqueSite>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectConfiguration {
    pub need_collect_resource: bool,
    pub need_carrier_resource: bool,
    pub quantity_source: CollectQuantitySource,
    pub default_quantity: Decimal,
    pub operator_sites: Vec<UniqueSite>,
}

/// Feed and collect behaviour of a station. The default value means nothing has
/// been configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationConfiguration {
    pub split_feed_and_collect: bool,
    pub feed: FeedConfiguration,
    pub collect: CollectConfiguration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStationConfigurationRequest {
    pub station_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStationConfigurationRequest {
    pub station_id: String,
    #[serde(flatten)]
    pub configuration: StationConfiguration,
}
