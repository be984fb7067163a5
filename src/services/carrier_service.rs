//! Carrier maintenance.

use std::sync::Arc;

use log::info;

use crate::errors::ApiError;
use crate::mcom::{
    self, CallContext, CarrierAction, DataManager, DeleteCarrierRequest, ListCarriersRequest, Order,
    PaginationRequest,
};
use crate::models::{CarrierData, CreateCarrierRequest, PaginatedData, Principal, UpdateCarrierRequest};

pub struct CarrierService {
    dm: Arc<dyn DataManager>,
}

impl CarrierService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    /// Carriers list by ID prefix, then serial number, unless asked otherwise.
    pub fn default_order() -> Vec<Order> {
        vec![Order::asc("id_prefix"), Order::asc("serial_number")]
    }

    pub async fn list(
        &self,
        principal: &Principal,
        department_oid: &str,
        pagination: Option<PaginationRequest>,
        order_by: Vec<Order>,
    ) -> Result<PaginatedData<CarrierData>, ApiError> {
        let reply = self
            .dm
            .list_carriers(
                &CallContext::user(&principal.id),
                ListCarriersRequest {
                    department_id: department_oid.to_string(),
                    pagination,
                    order_by,
                },
            )
            .await?;
        let items = reply.info.into_iter().map(CarrierData::from).collect();
        Ok(PaginatedData::new(items, reply.amount_of_data))
    }

    pub async fn create(&self, principal: &Principal, req: CreateCarrierRequest) -> Result<(), ApiError> {
        self.dm
            .create_carrier(
                &CallContext::user(&principal.id),
                mcom::CreateCarrierRequest {
                    department_id: req.department_oid,
                    id_prefix: req.id_prefix.clone(),
                    quantity: req.quantity,
                    allowed_material: req.allowed_material,
                },
            )
            .await?;
        info!("{} carriers with prefix {} created by {}", req.quantity, req.id_prefix, principal.id);
        Ok(())
    }

    pub async fn update(&self, principal: &Principal, id: &str, req: UpdateCarrierRequest) -> Result<(), ApiError> {
        self.dm
            .update_carrier(
                &CallContext::user(&principal.id),
                mcom::UpdateCarrierRequest {
                    id: id.to_string(),
                    action: CarrierAction::UpdateProperties {
                        allowed_material: req.allowed_material,
                    },
                },
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, principal: &Principal, id: &str) -> Result<(), ApiError> {
        self.dm
            .delete_carrier(&CallContext::user(&principal.id), DeleteCarrierRequest { id: id.to_string() })
            .await?;
        info!("Carrier {} deleted by {}", id, principal.id);
        Ok(())
    }
}
