use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Material, MaterialReply, MaterialStatus, Order, PaginationRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProductTypesRequest {
    pub department_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductTypesReply {
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductIDsRequest {
    #[serde(rename = "type")]
    pub product_type: String,
    pub is_last_process: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductIDsReply {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductGroupsRequest {
    pub department_id: String,
    #[serde(rename = "type")]
    pub product_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductGroup {
    pub id: String,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductGroupsReply {
    pub products: Vec<ProductGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMaterialResourcesRequest {
    pub product_id: String,
    pub product_type: String,
    pub status: MaterialStatus,
    pub created_after: Option<DateTime<Utc>>,
    pub pagination: Option<PaginationRequest>,
    pub order_by: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMaterialResourcesReply {
    pub resources: Vec<MaterialReply>,
    pub amount_of_data: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMultipleSubstitutionsRequest {
    pub product_ids: Vec<Material>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substitutions {
    pub product: Material,
    pub substitutions: Vec<Material>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMultipleSubstitutionsReply {
    pub reply: Vec<Substitutions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAllDepartmentReply {
    pub ids: Vec<String>,
}
