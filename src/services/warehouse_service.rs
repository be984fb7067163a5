use std::sync::Arc;

use log::info;

use crate::errors::ApiError;
use crate::mcom::{CallContext, DataManager, GetResourceWarehouseRequest, Warehouse, WarehousingStockRequest};
use crate::models::{Principal, WarehouseData, WarehouseTransactionRequest};

pub struct WarehouseService {
    dm: Arc<dyn DataManager>,
}

impl WarehouseService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    pub async fn resource_warehouse(
        &self,
        principal: &Principal,
        resource_id: &str,
    ) -> Result<WarehouseData, ApiError> {
        let warehouse = self
            .dm
            .get_resource_warehouse(
                &CallContext::user(&principal.id),
                GetResourceWarehouseRequest {
                    resource_id: resource_id.to_string(),
                },
            )
            .await?;
        Ok(warehouse.into())
    }

    /// Moves one resource into another warehouse location.
    pub async fn transfer(
        &self,
        principal: &Principal,
        resource_id: &str,
        req: WarehouseTransactionRequest,
    ) -> Result<(), ApiError> {
        self.dm
            .warehousing_stock(
                &CallContext::user(&principal.id),
                WarehousingStockRequest {
                    warehouse: Warehouse {
                        id: req.new_warehouse_id.clone(),
                        location: req.new_location,
                    },
                    resource_ids: vec![resource_id.to_string()],
                },
            )
            .await?;
        info!("Resource {} moved to warehouse {} by {}", resource_id, req.new_warehouse_id, principal.id);
        Ok(())
    }
}
