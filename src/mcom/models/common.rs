//! Value types shared by several data manager operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MaterialStatus, Role};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteId {
    pub name: String,
    pub index: i16,
}

/// A site addressed by its station and its per-station identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueSite {
    pub station: String,
    pub site_id: SiteId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub grade: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(rename = "type")]
    pub product_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub oid: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub page: u32,
    pub limit: u32,
}

impl PaginationRequest {
    /// Pagination applies only when both bounds are given.
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Option<Self> {
        match (page, limit) {
            (Some(page), Some(limit)) => Some(Self { page, limit }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub name: String,
    pub descending: bool,
}

impl Order {
    pub fn asc(name: &str) -> Self {
        Self {
            name: name.to_string(),
            descending: false,
        }
    }

    pub fn desc(name: &str) -> Self {
        Self {
            name: name.to_string(),
            descending: true,
        }
    }
}

/// Minimum, standard and maximum values of a recipe quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecimalRange {
    pub max: Option<Decimal>,
    pub mid: Option<Decimal>,
    pub min: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: i32,
    pub remark: String,
}

/// A material resource as stored by the data manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialResource {
    pub oid: String,
    pub id: String,
    pub grade: String,
    pub resource_id: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub status: MaterialStatus,
    pub quantity: Decimal,
    pub unit: String,
    pub lot_number: String,
    pub carrier_id: String,
    pub min_dosage: Decimal,
    pub inspections: Vec<Inspection>,
    pub remark: String,
    pub production_time: DateTime<Utc>,
    pub expiry_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialReply {
    pub material: MaterialResource,
    pub warehouse: Warehouse,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoles {
    pub id: String,
    pub roles: Vec<Role>,
}

/// A named value of an enumeration listed by the data manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: i32,
}
