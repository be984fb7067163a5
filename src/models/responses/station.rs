//! Station response models.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::mcom::{self, BoundResource, SiteContent, SiteSubType, SiteType, StationState};
use crate::utils::decimal::optional_decimal_string;

#[derive(Debug, Serialize, ToSchema)]
pub struct StationIdItem {
    #[serde(rename = "ID")]
    pub id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatorSiteData {
    #[serde(rename = "employeeID")]
    pub employee_id: String,
    pub group: i32,
    pub work_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaterialSiteData {
    #[serde(rename = "ID")]
    pub id: String,
    pub grade: String,
    pub quantity: String,
    #[serde(rename = "resourceID")]
    pub resource_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolSiteData {
    pub installed_time: DateTime<Utc>,
    #[serde(rename = "resourceID")]
    pub resource_id: String,
}

/// A bound resource shaped by the sub type of its site.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoundResourceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_site: Option<OperatorSiteData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_site: Option<MaterialSiteData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_site: Option<ToolSiteData>,
}

impl BoundResourceData {
    /// `None` when the resource does not carry the sub type of the site.
    fn parse(sub_type: SiteSubType, resource: &BoundResource) -> Option<Self> {
        match sub_type {
            SiteSubType::Operator => resource.operator.as_ref().map(|o| Self {
                operator_site: Some(OperatorSiteData {
                    employee_id: o.employee_id.clone(),
                    group: o.group,
                    work_date: o.work_date.and_time(NaiveTime::MIN).and_utc(),
                }),
                ..Default::default()
            }),
            SiteSubType::Material => resource.material.as_ref().map(|m| Self {
                material_site: Some(MaterialSiteData {
                    id: m.material.id.clone(),
                    grade: m.material.grade.clone(),
                    quantity: optional_decimal_string(m.quantity),
                    resource_id: m.resource_id.clone(),
                }),
                ..Default::default()
            }),
            SiteSubType::Tool => resource.tool.as_ref().map(|t| Self {
                tool_site: Some(ToolSiteData {
                    installed_time: t.installed_time,
                    resource_id: t.resource_id.clone(),
                }),
                ..Default::default()
            }),
            SiteSubType::Unspecified => None,
        }
    }
}

/// Maps resources of a site; an empty list has no representation.
pub fn parse_bound_resources(
    sub_type: SiteSubType,
    resources: &[BoundResource],
) -> Option<Vec<Option<BoundResourceData>>> {
    if resources.is_empty() {
        return None;
    }
    Some(
        resources
            .iter()
            .map(|r| BoundResourceData::parse(sub_type, r))
            .collect(),
    )
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct SiteContentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<BoundResourceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Vec<Option<BoundResourceData>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Vec<Option<BoundResourceData>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<Vec<Option<BoundResourceData>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Vec<BoundResourceData>>>)]
    pub colqueue: Option<Vec<Option<Vec<Option<BoundResourceData>>>>>,
}

impl SiteContentData {
    pub fn new(site_type: SiteType, sub_type: SiteSubType, content: &SiteContent) -> Self {
        let list = |items: &Option<Vec<BoundResource>>| {
            parse_bound_resources(sub_type, items.as_deref().unwrap_or_default())
        };
        let mut data = Self::default();
        match site_type {
            SiteType::Slot => {
                data.slot = content
                    .slot
                    .as_ref()
                    .and_then(|slot| BoundResourceData::parse(sub_type, slot));
            }
            SiteType::Container => data.container = list(&content.container),
            SiteType::Collection => data.collection = list(&content.collection),
            SiteType::Queue => data.queue = list(&content.queue),
            SiteType::Colqueue => {
                data.colqueue = content
                    .colqueue
                    .as_ref()
                    .filter(|c| !c.is_empty())
                    .map(|c| c.iter().map(|col| parse_bound_resources(sub_type, col)).collect());
            }
            SiteType::Unspecified => {}
        }
        data
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    pub content: SiteContentData,
    pub index: i16,
    pub name: String,
    #[schema(value_type = i32)]
    pub sub_type: SiteSubType,
    #[serde(rename = "type")]
    #[schema(value_type = i32)]
    pub site_type: SiteType,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationData {
    #[serde(rename = "ID")]
    pub id: String,
    pub code: String,
    pub description: String,
    pub inserted_at: DateTime<Utc>,
    pub inserted_by: String,
    pub sites: Vec<SiteData>,
    #[schema(value_type = i32)]
    pub state: StationState,
    pub update_at: DateTime<Utc>,
    pub update_by: String,
}

impl From<mcom::Station> for StationData {
    fn from(station: mcom::Station) -> Self {
        let sites = station
            .sites
            .iter()
            .map(|site| {
                let info = &site.information;
                SiteData {
                    content: SiteContentData::new(info.site_type, info.sub_type, &site.content),
                    index: info.index,
                    name: info.name.clone(),
                    sub_type: info.sub_type,
                    site_type: info.site_type,
                }
            })
            .collect();
        Self {
            id: station.id,
            code: station.information.code,
            description: station.information.description,
            inserted_at: station.inserted_at,
            inserted_by: station.inserted_by,
            sites,
            state: station.state,
            update_at: station.updated_at,
            update_by: station.updated_by,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StationListItem {
    #[serde(rename = "stationID")]
    pub station_id: String,
}

/// A site addressed the way the production flow pages address it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteAddress {
    #[serde(rename = "stationID")]
    pub station_id: String,
    pub site_name: String,
    #[serde(default)]
    pub site_index: i16,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationSiteItem {
    pub site: SiteAddress,
    /// Site type name
    #[serde(rename = "type")]
    pub site_type: String,
    #[schema(value_type = i32)]
    pub sub_type: SiteSubType,
}
