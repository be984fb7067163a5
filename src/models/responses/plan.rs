//! Production plan response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::mcom::ProductPlan;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanData {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub day_quantity: String,
    pub week_quantity: String,
    pub stock_quantity: String,
    pub scheduled_quantity: String,
}

impl From<ProductPlan> for PlanData {
    fn from(plan: ProductPlan) -> Self {
        Self {
            product_id: plan.product_id,
            day_quantity: plan.quantity.daily.to_string(),
            week_quantity: plan.quantity.week.to_string(),
            stock_quantity: plan.quantity.stock.to_string(),
            scheduled_quantity: plan.quantity.reserved.to_string(),
        }
    }
}
