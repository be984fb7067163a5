//! Product types, product IDs and material resources by product type.

use std::sync::Arc;

use crate::errors::ApiError;
use crate::mcom::{
    CallContext, DataManager, ListMaterialResourcesRequest, ListProductIDsRequest,
    ListProductTypesRequest, MaterialStatus, Order, PaginationRequest,
};
use crate::models::{MaterialByTypeQuery, PaginatedData, Principal, ProductTypeData, ResourceMaterialData};

pub struct ProductService {
    dm: Arc<dyn DataManager>,
}

impl ProductService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    /// Product types of a department; every type when the department is empty.
    pub async fn product_types(
        &self,
        principal: &Principal,
        department_oid: &str,
    ) -> Result<Vec<ProductTypeData>, ApiError> {
        let reply = self
            .dm
            .list_product_types(
                &CallContext::user(&principal.id),
                ListProductTypesRequest {
                    department_id: department_oid.to_string(),
                },
            )
            .await?;
        Ok(reply
            .types
            .into_iter()
            .map(|product_type| ProductTypeData { product_type })
            .collect())
    }

    pub async fn product_ids(
        &self,
        principal: &Principal,
        product_type: &str,
        is_last_process: bool,
    ) -> Result<Vec<String>, ApiError> {
        let reply = self
            .dm
            .list_product_ids(
                &CallContext::user(&principal.id),
                ListProductIDsRequest {
                    product_type: product_type.to_string(),
                    is_last_process,
                },
            )
            .await?;
        Ok(reply.ids)
    }

    pub fn material_default_order() -> Vec<Order> {
        vec![Order::asc("created_at")]
    }

    pub async fn materials_by_type(
        &self,
        principal: &Principal,
        product_type: &str,
        query: MaterialByTypeQuery,
        order_by: Vec<Order>,
    ) -> Result<PaginatedData<ResourceMaterialData>, ApiError> {
        let reply = self
            .dm
            .list_material_resources(
                &CallContext::user(&principal.id),
                ListMaterialResourcesRequest {
                    product_id: query.product_id.unwrap_or_default(),
                    product_type: product_type.to_string(),
                    status: query.status.unwrap_or(MaterialStatus::Unspecified),
                    created_after: query.start_date,
                    pagination: PaginationRequest::from_query(query.page, query.limit),
                    order_by,
                },
            )
            .await?;
        let items = reply.resources.into_iter().map(ResourceMaterialData::from).collect();
        Ok(PaginatedData::new(items, reply.amount_of_data))
    }
}
