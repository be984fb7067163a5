use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductPlansRequest {
    pub date: NaiveDate,
    pub department_id: String,
    pub product_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanQuantity {
    pub daily: Decimal,
    pub week: Decimal,
    pub stock: Decimal,
    pub reserved: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPlan {
    pub product_id: String,
    pub quantity: PlanQuantity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductPlansReply {
    pub product_plans: Vec<ProductPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductPlanRequest {
    pub date: NaiveDate,
    pub product: Product,
    pub department_id: String,
    pub quantity: Decimal,
}
