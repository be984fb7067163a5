//! Product request models.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::mcom::MaterialStatus;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProductTypeQuery {
    #[serde(rename = "departmentOid", alias = "departmentOID")]
    pub department_oid: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Only products made by the last process of their recipe
    pub is_last_process: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MaterialByTypeQuery {
    #[serde(rename = "productID")]
    pub product_id: Option<String>,
    #[param(value_type = Option<i32>)]
    pub status: Option<MaterialStatus>,
    /// Resources created at or after this time
    pub start_date: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
