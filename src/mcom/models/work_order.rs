//! Work orders and their batch quantity plans.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BatchSize, Order, PaginationRequest, Product, WorkOrderStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub batch_count: u32,
    pub plan_quantity: Decimal,
}

/// Quantity plan of a work order. `batch_quantity_type` carries a `BatchSize`
/// value; the data manager may report values this service does not know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchQuantityDetails {
    pub batch_quantity_type: i32,
    #[serde(default)]
    pub quantity_for_batches: Vec<Decimal>,
    #[serde(default)]
    pub fixed_quantity: Option<BatchPlan>,
    #[serde(default)]
    pub plan_quantity: Option<BatchPlan>,
}

/// Flattened view of a batch quantity plan.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub per_batch_quantity: Vec<Decimal>,
    pub batch_count: i64,
    pub plan_quantity: Decimal,
}

impl BatchQuantityDetails {
    pub fn per_batch(quantities: Vec<Decimal>) -> Self {
        Self {
            batch_quantity_type: BatchSize::PerBatchQuantities.value(),
            quantity_for_batches: quantities,
            ..Default::default()
        }
    }

    pub fn fixed(batch_count: u32, plan_quantity: Decimal) -> Self {
        Self {
            batch_quantity_type: BatchSize::FixedQuantity.value(),
            fixed_quantity: Some(BatchPlan {
                batch_count,
                plan_quantity,
            }),
            ..Default::default()
        }
    }

    pub fn plan(batch_count: u32, plan_quantity: Decimal) -> Self {
        Self {
            batch_quantity_type: BatchSize::PlanQuantity.value(),
            plan_quantity: Some(BatchPlan {
                batch_count,
                plan_quantity,
            }),
            ..Default::default()
        }
    }

    pub fn batch_size(&self) -> Option<BatchSize> {
        BatchSize::try_from(self.batch_quantity_type).ok()
    }

    pub fn summary(&self) -> Result<BatchSummary, String> {
        let plan_of = |plan: &Option<BatchPlan>| {
            let plan = plan.clone().unwrap_or_default();
            BatchSummary {
                per_batch_quantity: Vec::new(),
                batch_count: i64::from(plan.batch_count),
                plan_quantity: plan.plan_quantity,
            }
        };
        match self.batch_size() {
            Some(BatchSize::PerBatchQuantities) => {
                let plan_quantity = self
                    .quantity_for_batches
                    .iter()
                    .try_fold(Decimal::ZERO, |total, q| total.checked_add(*q))
                    .ok_or_else(|| "plan quantity out of range".to_string())?;
                Ok(BatchSummary {
                    per_batch_quantity: self.quantity_for_batches.clone(),
                    batch_count: self.quantity_for_batches.len() as i64,
                    plan_quantity,
                })
            }
            Some(BatchSize::FixedQuantity) => Ok(plan_of(&self.fixed_quantity)),
            Some(BatchSize::PlanQuantity) => Ok(plan_of(&self.plan_quantity)),
            None => Err(format!(
                "no implementation with {} of BatchSize",
                self.batch_quantity_type
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub oid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub process_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    pub product: Product,
    pub process: Process,
    pub recipe_id: String,
    pub department_id: String,
    pub station: String,
    pub date: NaiveDate,
    pub sequence: i32,
    pub status: WorkOrderStatus,
    pub batch_quantity_details: BatchQuantityDetails,
    #[serde(default)]
    pub current_batch: i32,
    #[serde(default)]
    pub collected_sequence: i32,
    #[serde(default)]
    pub collected_quantity: Decimal,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub parent: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
    pub inserted_at: DateTime<Utc>,
    pub inserted_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWorkOrderRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWorkOrder {
    pub process_oid: String,
    pub recipe_id: String,
    pub process_name: String,
    pub process_type: String,
    pub department_id: String,
    pub station: String,
    pub date: NaiveDate,
    pub batches_quantity: BatchQuantityDetails,
    #[serde(default)]
    pub parent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkOrdersRequest {
    pub work_orders: Vec<CreateWorkOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkOrdersReply {
    pub ids: Vec<String>,
}

/// Partial update of a work order; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWorkOrder {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abnormality: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_oid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batches_quantity: Option<BatchQuantityDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkOrdersRequest {
    pub orders: Vec<UpdateWorkOrder>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListWorkOrdersByDurationRequest {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub station: String,
    pub department_id: String,
    pub pagination: Option<PaginationRequest>,
    pub order_by: Vec<Order>,
}

impl ListWorkOrdersByDurationRequest {
    /// Orders by reserved date, then by reserved sequence.
    pub fn reserved_order() -> Vec<Order> {
        vec![Order::asc("reserved_date"), Order::asc("reserved_sequence")]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListWorkOrdersByDurationReply {
    pub contents: Vec<WorkOrder>,
    #[serde(default)]
    pub amount_of_data: i64,
}
