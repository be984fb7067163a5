//! Station request models.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::mcom::{Order, SiteSubType, SiteType, StationState};

/// Site of a created or edited station
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteRequest {
    /// 1 adds the site, 2 removes it
    #[schema(example = 1)]
    pub action_mode: i32,
    pub name: String,
    #[serde(default)]
    pub index: i16,
    #[serde(rename = "type")]
    #[schema(value_type = i32)]
    pub site_type: SiteType,
    #[schema(value_type = i32)]
    pub sub_type: SiteSubType,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStationRequest {
    #[serde(rename = "ID")]
    #[validate(length(min = 1, message = "ID is required"))]
    pub id: String,
    #[serde(rename = "departmentOID")]
    #[validate(length(min = 1, message = "departmentOID is required"))]
    pub department_oid: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sites: Vec<SiteRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStationRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = i32)]
    pub state: StationState,
    #[serde(default)]
    pub sites: Vec<SiteRequest>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order_name: String,
    #[serde(default)]
    pub descending: bool,
}

/// Optional sort order of a paginated list.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListOrderBody {
    #[serde(default)]
    pub order_request: Vec<OrderRequest>,
}

impl ListOrderBody {
    /// Requested orders, or `default` when none were given.
    pub fn orders_or(self, default: Vec<Order>) -> Vec<Order> {
        if self.order_request.is_empty() {
            return default;
        }
        self.order_request
            .into_iter()
            .map(|o| Order {
                name: o.order_name,
                descending: o.descending,
            })
            .collect()
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DepartmentQuery {
    #[serde(rename = "departmentOID", default)]
    pub department_oid: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationSignInRequest {
    #[validate(length(min = 1, message = "siteName is required"))]
    pub site_name: String,
    pub group: i32,
    #[schema(value_type = String, format = Date)]
    pub work_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StationSiteName {
    #[serde(rename = "stationID")]
    pub station_id: String,
    #[serde(rename = "siteName")]
    pub site_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationSignOutRequest {
    pub station_sites: Vec<StationSiteName>,
}
