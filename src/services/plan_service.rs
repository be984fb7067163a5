//! Production plans per department and product type.

use std::sync::Arc;

use chrono::NaiveDate;
use log::info;

use crate::errors::ApiError;
use crate::mcom::{CallContext, CreateProductPlanRequest, DataManager, ListProductPlansRequest, Product};
use crate::models::{AddPlanRequest, PlanData, Principal};
use crate::validators::require_decimal;

pub struct PlanService {
    dm: Arc<dyn DataManager>,
}

impl PlanService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    pub async fn list(
        &self,
        principal: &Principal,
        department_oid: &str,
        product_type: &str,
        date: NaiveDate,
    ) -> Result<Vec<PlanData>, ApiError> {
        let reply = self
            .dm
            .list_product_plans(
                &CallContext::user(&principal.id),
                ListProductPlansRequest {
                    date,
                    department_id: department_oid.to_string(),
                    product_type: product_type.to_string(),
                },
            )
            .await?;
        Ok(reply.product_plans.into_iter().map(PlanData::from).collect())
    }

    pub async fn add(&self, principal: &Principal, req: AddPlanRequest) -> Result<(), ApiError> {
        let quantity = require_decimal(&req.day_quantity)?;
        self.dm
            .create_product_plan(
                &CallContext::user(&principal.id),
                CreateProductPlanRequest {
                    date: req.date,
                    product: Product {
                        id: req.product_id.clone(),
                        product_type: req.product_type,
                    },
                    department_id: req.department_oid,
                    quantity,
                },
            )
            .await?;
        info!("Plan of {} on {} added by {}", req.product_id, req.date, principal.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::mcom::{ErrorCode, Role};
    use crate::test_support::{client, USER};

    fn principal() -> Principal {
        Principal {
            id: USER.into(),
            roles: vec![Role::Planner],
        }
    }

    fn request(day_quantity: &str) -> AddPlanRequest {
        AddPlanRequest {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            product_id: "P1".into(),
            product_type: "RUBBER".into(),
            department_oid: "D1".into(),
            day_quantity: day_quantity.into(),
        }
    }

    #[actix_web::test]
    async fn test_add_plan_rejects_bad_quantity() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateProductPlan");
                then.status(200);
            })
            .await;

        let err = PlanService::new(client(&server))
            .add(&principal(), request("lots"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Mcom(e) if e.code == ErrorCode::InvalidNumber && e.details == "invalid_number=lots"));
        create.assert_hits_async(0).await;
    }

    #[actix_web::test]
    async fn test_add_plan() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateProductPlan").json_body(json!({
                    "date": "2024-03-01",
                    "product": {"id": "P1", "type": "RUBBER"},
                    "department_id": "D1",
                    "quantity": "120.5"
                }));
                then.status(200);
            })
            .await;

        PlanService::new(client(&server))
            .add(&principal(), request("120.5"))
            .await
            .unwrap();
        create.assert_async().await;
    }

    #[actix_web::test]
    async fn test_list_plans_as_strings() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ListProductPlans");
                then.status(200).json_body(json!({"product_plans": [{
                    "product_id": "P1",
                    "quantity": {"daily": "10", "week": "70.5", "stock": "3", "reserved": "0"}
                }]}));
            })
            .await;

        let plans = PlanService::new(client(&server))
            .list(&principal(), "D1", "RUBBER", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&plans).unwrap(),
            json!([{
                "productID": "P1",
                "dayQuantity": "10",
                "weekQuantity": "70.5",
                "stockQuantity": "3",
                "scheduledQuantity": "0"
            }])
        );
    }
}
