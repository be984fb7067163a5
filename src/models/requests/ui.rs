//! UI configuration request models.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::StationConfigData;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStationConfigRequest {
    pub station_config: StationConfigData,
}
