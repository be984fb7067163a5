//! Seam to the external data manager that owns every domain entity.
//!
//! Handlers never touch persistence directly: each operation is a typed request
//! sent through [`DataManager`] on behalf of the acting user.

mod client;
mod errors;
pub mod models;

use async_trait::async_trait;

pub use client::McomClient;
pub use errors::{DataManagerError, ErrorCode, McomError};
pub use models::*;

pub type McomResult<T> = Result<T, DataManagerError>;

/// Identity a data manager call is made for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    pub user_id: String,
}

impl CallContext {
    pub fn user(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
        }
    }

    /// Calls made before a user is known, such as signing in.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[async_trait]
pub trait DataManager: Send + Sync {
    // account
    async fn get_token_info(
        &self,
        ctx: &CallContext,
        req: GetTokenInfoRequest,
    ) -> McomResult<GetTokenInfoReply>;
    async fn sign_in(&self, ctx: &CallContext, req: SignInRequest) -> McomResult<SignInReply>;
    async fn sign_out(&self, ctx: &CallContext, req: SignOutRequest) -> McomResult<()>;
    async fn update_account(&self, ctx: &CallContext, req: UpdateAccountRequest)
        -> McomResult<()>;
    async fn list_roles(&self, ctx: &CallContext) -> McomResult<ListRolesReply>;
    async fn list_unauthorized_users(
        &self,
        ctx: &CallContext,
        req: ListUnauthorizedUsersRequest,
    ) -> McomResult<ListUnauthorizedUsersReply>;
    async fn list_user_roles(
        &self,
        ctx: &CallContext,
        req: ListUserRolesRequest,
    ) -> McomResult<ListUserRolesReply>;
    async fn create_accounts(
        &self,
        ctx: &CallContext,
        req: CreateAccountsRequest,
    ) -> McomResult<()>;
    async fn delete_account(&self, ctx: &CallContext, req: DeleteAccountRequest)
        -> McomResult<()>;

    // carrier
    async fn list_carriers(
        &self,
        ctx: &CallContext,
        req: ListCarriersRequest,
    ) -> McomResult<ListCarriersReply>;
    async fn get_carrier(&self, ctx: &CallContext, req: GetCarrierRequest)
        -> McomResult<CarrierInfo>;
    async fn create_carrier(&self, ctx: &CallContext, req: CreateCarrierRequest)
        -> McomResult<()>;
    async fn update_carrier(&self, ctx: &CallContext, req: UpdateCarrierRequest)
        -> McomResult<()>;
    async fn delete_carrier(&self, ctx: &CallContext, req: DeleteCarrierRequest)
        -> McomResult<()>;

    // plan
    async fn list_product_plans(
        &self,
        ctx: &CallContext,
        req: ListProductPlansRequest,
    ) -> McomResult<ListProductPlansReply>;
    async fn create_product_plan(
        &self,
        ctx: &CallContext,
        req: CreateProductPlanRequest,
    ) -> McomResult<()>;

    // product
    async fn list_product_types(
        &self,
        ctx: &CallContext,
        req: ListProductTypesRequest,
    ) -> McomResult<ListProductTypesReply>;
    async fn list_product_ids(
        &self,
        ctx: &CallContext,
        req: ListProductIDsRequest,
    ) -> McomResult<ListProductIDsReply>;
    async fn list_product_groups(
        &self,
        ctx: &CallContext,
        req: ListProductGroupsRequest,
    ) -> McomResult<ListProductGroupsReply>;
    async fn list_material_resources(
        &self,
        ctx: &CallContext,
        req: ListMaterialResourcesRequest,
    ) -> McomResult<ListMaterialResourcesReply>;
    async fn list_multiple_substitutions(
        &self,
        ctx: &CallContext,
        req: ListMultipleSubstitutionsRequest,
    ) -> McomResult<ListMultipleSubstitutionsReply>;
    async fn list_all_departments(&self, ctx: &CallContext)
        -> McomResult<ListAllDepartmentReply>;

    // station
    async fn list_stations(
        &self,
        ctx: &CallContext,
        req: ListStationsRequest,
    ) -> McomResult<ListStationsReply>;
    async fn get_station(&self, ctx: &CallContext, req: GetStationRequest) -> McomResult<Station>;
    async fn create_station(&self, ctx: &CallContext, req: CreateStationRequest)
        -> McomResult<()>;
    async fn update_station(&self, ctx: &CallContext, req: UpdateStationRequest)
        -> McomResult<()>;
    async fn delete_station(&self, ctx: &CallContext, req: DeleteStationRequest)
        -> McomResult<()>;
    async fn list_station_state(&self, ctx: &CallContext) -> McomResult<ListStationStateReply>;
    async fn list_station_ids(
        &self,
        ctx: &CallContext,
        req: ListStationIDsRequest,
    ) -> McomResult<ListStationIDsReply>;
    async fn sign_in_station(&self, ctx: &CallContext, req: SignInStationRequest)
        -> McomResult<()>;
    async fn sign_out_stations(
        &self,
        ctx: &CallContext,
        req: SignOutStationsRequest,
    ) -> McomResult<()>;
    async fn get_station_configuration(
        &self,
        ctx: &CallContext,
        req: GetStationConfigurationRequest,
    ) -> McomResult<StationConfiguration>;
    async fn set_station_configuration(
        &self,
        ctx: &CallContext,
        req: SetStationConfigurationRequest,
    ) -> McomResult<()>;

    // site
    async fn get_site(&self, ctx: &CallContext, req: GetSiteRequest) -> McomResult<GetSiteReply>;
    async fn list_site_materials(
        &self,
        ctx: &CallContext,
        req: ListSiteMaterialsRequest,
    ) -> McomResult<ListSiteMaterialsReply>;
    async fn list_site_type(&self, ctx: &CallContext) -> McomResult<ListSiteTypesReply>;
    async fn list_site_sub_type(&self, ctx: &CallContext) -> McomResult<ListSiteTypesReply>;
    async fn list_material_resource_identities(
        &self,
        ctx: &CallContext,
        req: ListMaterialResourceIdentitiesRequest,
    ) -> McomResult<ListMaterialResourceIdentitiesReply>;
    async fn material_resource_bind_v2(
        &self,
        ctx: &CallContext,
        req: MaterialResourceBindRequestV2,
    ) -> McomResult<()>;
    async fn tool_resource_bind_v2(
        &self,
        ctx: &CallContext,
        req: ToolResourceBindRequestV2,
    ) -> McomResult<()>;
    async fn get_tool_resource(
        &self,
        ctx: &CallContext,
        req: GetToolResourceRequest,
    ) -> McomResult<GetToolResourceReply>;

    // work order
    async fn get_work_order(&self, ctx: &CallContext, req: GetWorkOrderRequest)
        -> McomResult<WorkOrder>;
    async fn create_work_orders(
        &self,
        ctx: &CallContext,
        req: CreateWorkOrdersRequest,
    ) -> McomResult<CreateWorkOrdersReply>;
    async fn update_work_orders(
        &self,
        ctx: &CallContext,
        req: UpdateWorkOrdersRequest,
    ) -> McomResult<()>;
    async fn list_work_orders_by_duration(
        &self,
        ctx: &CallContext,
        req: ListWorkOrdersByDurationRequest,
    ) -> McomResult<ListWorkOrdersByDurationReply>;

    // produce
    async fn get_batch(&self, ctx: &CallContext, req: GetBatchRequest) -> McomResult<GetBatchReply>;
    async fn create_batch(&self, ctx: &CallContext, req: CreateBatchRequest) -> McomResult<()>;
    async fn update_batch(&self, ctx: &CallContext, req: UpdateBatchRequest) -> McomResult<()>;
    async fn feed(&self, ctx: &CallContext, req: FeedRequest) -> McomResult<()>;
    async fn create_collect_record(
        &self,
        ctx: &CallContext,
        req: CreateCollectRecordRequest,
    ) -> McomResult<()>;
    async fn get_limitary_hour(
        &self,
        ctx: &CallContext,
        req: GetLimitaryHourRequest,
    ) -> McomResult<GetLimitaryHourReply>;

    // resource
    async fn create_material_resources(
        &self,
        ctx: &CallContext,
        req: CreateMaterialResourcesRequest,
    ) -> McomResult<CreateMaterialResourcesReply>;
    async fn split_material_resource(
        &self,
        ctx: &CallContext,
        req: SplitMaterialResourceRequest,
    ) -> McomResult<SplitMaterialResourceReply>;
    async fn get_material_resource(
        &self,
        ctx: &CallContext,
        req: GetMaterialResourceRequest,
    ) -> McomResult<GetMaterialResourceReply>;
    async fn list_material_resource_status(
        &self,
        ctx: &CallContext,
    ) -> McomResult<ListMaterialResourceStatusReply>;
    async fn get_resource_warehouse(
        &self,
        ctx: &CallContext,
        req: GetResourceWarehouseRequest,
    ) -> McomResult<Warehouse>;
    async fn warehousing_stock(
        &self,
        ctx: &CallContext,
        req: WarehousingStockRequest,
    ) -> McomResult<()>;

    // recipe
    async fn get_process_definition(
        &self,
        ctx: &CallContext,
        req: GetProcessDefinitionRequest,
    ) -> McomResult<ProcessDefinition>;
    async fn get_recipe(&self, ctx: &CallContext, req: GetRecipeRequest)
        -> McomResult<GetRecipeReply>;
    async fn list_recipes_by_product(
        &self,
        ctx: &CallContext,
        req: ListRecipesByProductRequest,
    ) -> McomResult<ListRecipesByProductReply>;
}
