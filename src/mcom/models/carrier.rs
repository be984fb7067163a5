use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Order, PaginationRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCarriersRequest {
    pub department_id: String,
    pub pagination: Option<PaginationRequest>,
    pub order_by: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierInfo {
    pub id: String,
    pub allowed_material: String,
    #[serde(default)]
    pub contents: Vec<String>,
    pub update_by: String,
    pub update_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCarriersReply {
    pub info: Vec<CarrierInfo>,
    pub amount_of_data: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCarrierRequest {
    pub department_id: String,
    pub id_prefix: String,
    pub quantity: i32,
    pub allowed_material: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarrierAction {
    UpdateProperties { allowed_material: String },
    ClearResources,
    BindResources { resource_ids: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCarrierRequest {
    pub id: String,
    pub action: CarrierAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCarrierRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCarrierRequest {
    pub id: String,
}
