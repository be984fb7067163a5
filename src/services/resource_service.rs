//! Material stock, splitting and tool lookup.

use std::sync::Arc;

use log::info;

use crate::errors::ApiError;
use crate::mcom::{
    CallContext, CreateMaterialResource, CreateMaterialResourcesRequest, DataManager,
    GetMaterialResourceRequest, GetToolResourceRequest, MaterialStatus,
    SplitMaterialResourceRequest, Warehouse,
};
use crate::models::{
    AddMaterialRequest, IdName, Principal, ResourceIdData, ResourceMaterialData,
    SplitMaterialRequest, ToolIdData,
};
use crate::validators::{require_decimal, require_float_decimal};

pub struct ResourceService {
    dm: Arc<dyn DataManager>,
}

impl ResourceService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    /// Creates a material resource under inspection and stocks it in the given
    /// warehouse.
    pub async fn add_material(
        &self,
        principal: &Principal,
        req: AddMaterialRequest,
    ) -> Result<ResourceIdData, ApiError> {
        let resource = req.resource;
        let quantity = require_decimal(&resource.quantity)?;

        let reply = self
            .dm
            .create_material_resources(
                &CallContext::user(&principal.id),
                CreateMaterialResourcesRequest {
                    materials: vec![CreateMaterialResource {
                        product_type: resource.product_type,
                        id: resource.product_id,
                        grade: resource.grade,
                        status: MaterialStatus::Inspection,
                        quantity,
                        unit: resource.unit,
                        lot_number: resource.lot_number,
                        production_time: resource.production_time,
                        expiry_time: resource.expiry_time,
                        resource_id: String::new(),
                        carrier_id: String::new(),
                    }],
                    stock_in: Some(Warehouse {
                        id: req.warehouse.id,
                        location: req.warehouse.location,
                    }),
                },
            )
            .await?;

        match reply.resources.as_slice() {
            [created] => {
                info!("Material resource {} added by {}", created.id, principal.id);
                Ok(ResourceIdData {
                    resource_id: created.id.clone(),
                })
            }
            others => Err(ApiError::internal(format!(
                "unexpected add material result={:?}",
                others.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
            ))),
        }
    }

    pub async fn split_material(
        &self,
        principal: &Principal,
        req: SplitMaterialRequest,
    ) -> Result<ResourceIdData, ApiError> {
        let quantity = require_float_decimal(req.split_quantity)?;
        let inspection_ids = req
            .inspections
            .iter()
            .map(|&id| i32::try_from(id).map_err(|_| ApiError::internal(format!("inspection ID {} out of range", id))))
            .collect::<Result<Vec<_>, _>>()?;

        let reply = self
            .dm
            .split_material_resource(
                &CallContext::user(&principal.id),
                SplitMaterialResourceRequest {
                    resource_id: req.resource_id,
                    product_type: req.product_type,
                    quantity,
                    inspection_ids,
                    remark: req.remark,
                },
            )
            .await?;
        Ok(ResourceIdData {
            resource_id: reply.new_resource_id,
        })
    }

    /// Every stocked material resource sharing the resource ID.
    pub async fn material_info(
        &self,
        principal: &Principal,
        resource_id: &str,
    ) -> Result<Vec<ResourceMaterialData>, ApiError> {
        let reply = self
            .dm
            .get_material_resource(
                &CallContext::user(&principal.id),
                GetMaterialResourceRequest {
                    resource_id: resource_id.to_string(),
                },
            )
            .await?;
        Ok(reply.materials.into_iter().map(Into::into).collect())
    }

    /// Material statuses by name; names this service does not know get id 0.
    pub async fn list_material_status(&self, principal: &Principal) -> Result<Vec<IdName>, ApiError> {
        let reply = self
            .dm
            .list_material_resource_status(&CallContext::user(&principal.id))
            .await?;
        Ok(reply
            .statuses
            .iter()
            .map(|name| {
                let id = MaterialStatus::from_name(name).map(|s| s.value()).unwrap_or_default();
                IdName::new(id, name)
            })
            .collect())
    }

    pub async fn tool_id(&self, principal: &Principal, tool_resource_id: &str) -> Result<ToolIdData, ApiError> {
        let reply = self
            .dm
            .get_tool_resource(
                &CallContext::user(&principal.id),
                GetToolResourceRequest {
                    resource_id: tool_resource_id.to_string(),
                },
            )
            .await?;
        Ok(ToolIdData { tool_id: reply.tool_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::mcom::{ErrorCode, Role};
    use crate::models::{NewMaterialResource, StockWarehouse};
    use crate::test_support::{client, USER};

    fn principal() -> Principal {
        Principal {
            id: USER.into(),
            roles: vec![Role::Inspector],
        }
    }

    fn add_request(quantity: &str) -> AddMaterialRequest {
        AddMaterialRequest {
            warehouse: StockWarehouse {
                id: "W1".into(),
                location: "A1".into(),
            },
            resource: NewMaterialResource {
                product_type: "RUBBER".into(),
                product_id: "P1".into(),
                grade: "A".into(),
                quantity: quantity.into(),
                unit: "kg".into(),
                lot_number: "L1".into(),
                production_time: "2024-03-01T00:00:00Z".parse().unwrap(),
                expiry_time: "2024-04-01T00:00:00Z".parse().unwrap(),
            },
        }
    }

    #[actix_web::test]
    async fn test_add_material_stocks_under_inspection() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateMaterialResources").json_body(json!({
                    "materials": [{
                        "type": "RUBBER",
                        "id": "P1",
                        "grade": "A",
                        "status": 1,
                        "quantity": "12.5",
                        "unit": "kg",
                        "lot_number": "L1",
                        "production_time": "2024-03-01T00:00:00Z",
                        "expiry_time": "2024-04-01T00:00:00Z",
                        "resource_id": "",
                        "carrier_id": ""
                    }],
                    "stock_in": {"id": "W1", "location": "A1"}
                }));
                then.status(200)
                    .json_body(json!({"resources": [{"oid": "o1", "id": "R1"}]}));
            })
            .await;

        let data = ResourceService::new(client(&server))
            .add_material(&principal(), add_request("12.5"))
            .await
            .unwrap();
        create.assert_async().await;
        assert_eq!(data.resource_id, "R1");
    }

    #[actix_web::test]
    async fn test_add_material_rejects_bad_quantity() {
        let server = MockServer::start_async().await;
        let err = ResourceService::new(client(&server))
            .add_material(&principal(), add_request("lots"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Mcom(e) if e.code == ErrorCode::InvalidNumber && e.details == "invalid_number=lots"));
    }

    #[actix_web::test]
    async fn test_add_material_needs_exactly_one_result() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateMaterialResources");
                then.status(200).json_body(json!({"resources": [
                    {"oid": "o1", "id": "R1"}, {"oid": "o2", "id": "R2"}
                ]}));
            })
            .await;
        let err = ResourceService::new(client(&server))
            .add_material(&principal(), add_request("1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Internal(d) if d == r#"unexpected add material result=["R1", "R2"]"#));
    }

    #[actix_web::test]
    async fn test_material_status_ids_follow_names() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ListMaterialResourceStatus");
                then.status(200)
                    .json_body(json!({"statuses": ["AVAILABLE", "HOLD", "SCRAPPED"]}));
            })
            .await;
        let statuses = ResourceService::new(client(&server))
            .list_material_status(&principal())
            .await
            .unwrap();
        assert_eq!(
            statuses,
            vec![IdName::new(2, "AVAILABLE"), IdName::new(3, "HOLD"), IdName::new(0, "SCRAPPED")]
        );
    }
}
