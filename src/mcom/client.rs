//! HTTP client for a data manager exposed as JSON operations.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::*;

const USER_ID_HEADER: &str = "x-user-id";

/// Error body returned by the data manager on a non-2xx answer.
#[derive(Debug, Deserialize)]
struct RawError {
    code: i32,
    #[serde(default)]
    details: String,
}

/// Posts each operation to `{endpoint}/{OperationName}`.
#[derive(Clone)]
pub struct McomClient {
    http: reqwest::Client,
    endpoint: String,
}

impl McomClient {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, DataManagerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| DataManagerError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn send<Req: Serialize + ?Sized + Sync>(
        &self,
        ctx: &CallContext,
        operation: &str,
        req: &Req,
    ) -> McomResult<reqwest::Response> {
        let url = format!("{}/{}", self.endpoint, operation);
        debug!("Calling data manager operation {}", operation);

        let response = self
            .http
            .post(&url)
            .header(USER_ID_HEADER, &ctx.user_id)
            .json(req)
            .send()
            .await
            .map_err(|e| DataManagerError::Transport(format!("{}: {}", operation, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<RawError>(&body) {
            Ok(raw) => {
                let code = ErrorCode::try_from(raw.code).unwrap_or(ErrorCode::Unspecified);
                Err(McomError::new(code, raw.details).into())
            }
            Err(_) => Err(DataManagerError::Transport(format!(
                "{} answered {}: {}",
                operation, status, body
            ))),
        }
    }

    async fn call<Req, Rep>(&self, ctx: &CallContext, operation: &str, req: &Req) -> McomResult<Rep>
    where
        Req: Serialize + ?Sized + Sync,
        Rep: DeserializeOwned,
    {
        self.send(ctx, operation, req)
            .await?
            .json::<Rep>()
            .await
            .map_err(|e| DataManagerError::Transport(format!("decode {} reply: {}", operation, e)))
    }

    async fn call_unit<Req>(&self, ctx: &CallContext, operation: &str, req: &Req) -> McomResult<()>
    where
        Req: Serialize + ?Sized + Sync,
    {
        self.send(ctx, operation, req).await.map(|_| ())
    }
}

#[async_trait]
impl DataManager for McomClient {
    async fn get_token_info(
        &self,
        ctx: &CallContext,
        req: GetTokenInfoRequest,
    ) -> McomResult<GetTokenInfoReply> {
        self.call(ctx, "GetTokenInfo", &req).await
    }

    async fn sign_in(&self, ctx: &CallContext, req: SignInRequest) -> McomResult<SignInReply> {
        self.call(ctx, "SignIn", &req).await
    }

    async fn sign_out(&self, ctx: &CallContext, req: SignOutRequest) -> McomResult<()> {
        self.call_unit(ctx, "SignOut", &req).await
    }

    async fn update_account(
        &self,
        ctx: &CallContext,
        req: UpdateAccountRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "UpdateAccount", &req).await
    }

    async fn list_roles(&self, ctx: &CallContext) -> McomResult<ListRolesReply> {
        self.call(ctx, "ListRoles", &json!({})).await
    }

    async fn list_unauthorized_users(
        &self,
        ctx: &CallContext,
        req: ListUnauthorizedUsersRequest,
    ) -> McomResult<ListUnauthorizedUsersReply> {
        self.call(ctx, "ListUnauthorizedUsers", &req).await
    }

    async fn list_user_roles(
        &self,
        ctx: &CallContext,
        req: ListUserRolesRequest,
    ) -> McomResult<ListUserRolesReply> {
        self.call(ctx, "ListUserRoles", &req).await
    }

    async fn create_accounts(
        &self,
        ctx: &CallContext,
        req: CreateAccountsRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "CreateAccounts", &req).await
    }

    async fn delete_account(
        &self,
        ctx: &CallContext,
        req: DeleteAccountRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "DeleteAccount", &req).await
    }

    async fn list_carriers(
        &self,
        ctx: &CallContext,
        req: ListCarriersRequest,
    ) -> McomResult<ListCarriersReply> {
        self.call(ctx, "ListCarriers", &req).await
    }

    async fn get_carrier(
        &self,
        ctx: &CallContext,
        req: GetCarrierRequest,
    ) -> McomResult<CarrierInfo> {
        self.call(ctx, "GetCarrier", &req).await
    }

    async fn create_carrier(
        &self,
        ctx: &CallContext,
        req: CreateCarrierRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "CreateCarrier", &req).await
    }

    async fn update_carrier(
        &self,
        ctx: &CallContext,
        req: UpdateCarrierRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "UpdateCarrier", &req).await
    }

    async fn delete_carrier(
        &self,
        ctx: &CallContext,
        req: DeleteCarrierRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "DeleteCarrier", &req).await
    }

    async fn list_product_plans(
        &self,
        ctx: &CallContext,
        req: ListProductPlansRequest,
    ) -> McomResult<ListProductPlansReply> {
        self.call(ctx, "ListProductPlans", &req).await
    }

    async fn create_product_plan(
        &self,
        ctx: &CallContext,
        req: CreateProductPlanRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "CreateProductPlan", &req).await
    }

    async fn list_product_types(
        &self,
        ctx: &CallContext,
        req: ListProductTypesRequest,
    ) -> McomResult<ListProductTypesReply> {
        self.call(ctx, "ListProductTypes", &req).await
    }

    async fn list_product_ids(
        &self,
        ctx: &CallContext,
        req: ListProductIDsRequest,
    ) -> McomResult<ListProductIDsReply> {
        self.call(ctx, "ListProductIDs", &req).await
    }

    async fn list_product_groups(
        &self,
        ctx: &CallContext,
        req: ListProductGroupsRequest,
    ) -> McomResult<ListProductGroupsReply> {
        self.call(ctx, "ListProductGroups", &req).await
    }

    async fn list_material_resources(
        &self,
        ctx: &CallContext,
        req: ListMaterialResourcesRequest,
    ) -> McomResult<ListMaterialResourcesReply> {
        self.call(ctx, "ListMaterialResources", &req).await
    }

    async fn list_multiple_substitutions(
        &self,
        ctx: &CallContext,
        req: ListMultipleSubstitutionsRequest,
    ) -> McomResult<ListMultipleSubstitutionsReply> {
        self.call(ctx, "ListMultipleSubstitutions", &req).await
    }

    async fn list_all_departments(&self, ctx: &CallContext) -> McomResult<ListAllDepartmentReply> {
        self.call(ctx, "ListAllDepartment", &json!({})).await
    }

    async fn list_stations(
        &self,
        ctx: &CallContext,
        req: ListStationsRequest,
    ) -> McomResult<ListStationsReply> {
        self.call(ctx, "ListStations", &req).await
    }

    async fn get_station(&self, ctx: &CallContext, req: GetStationRequest) -> McomResult<Station> {
        self.call(ctx, "GetStation", &req).await
    }

    async fn create_station(
        &self,
        ctx: &CallContext,
        req: CreateStationRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "CreateStation", &req).await
    }

    async fn update_station(
        &self,
        ctx: &CallContext,
        req: UpdateStationRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "UpdateStation", &req).await
    }

    async fn delete_station(
        &self,
        ctx: &CallContext,
        req: DeleteStationRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "DeleteStation", &req).await
    }

    async fn list_station_state(&self, ctx: &CallContext) -> McomResult<ListStationStateReply> {
        self.call(ctx, "ListStationState", &json!({})).await
    }

    async fn list_station_ids(
        &self,
        ctx: &CallContext,
        req: ListStationIDsRequest,
    ) -> McomResult<ListStationIDsReply> {
        self.call(ctx, "ListStationIDs", &req).await
    }

    async fn sign_in_station(
        &self,
        ctx: &CallContext,
        req: SignInStationRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "SignInStation", &req).await
    }

    async fn sign_out_stations(
        &self,
        ctx: &CallContext,
        req: SignOutStationsRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "SignOutStations", &req).await
    }

    async fn get_station_configuration(
        &self,
        ctx: &CallContext,
        req: GetStationConfigurationRequest,
    ) -> McomResult<StationConfiguration> {
        self.call(ctx, "GetStationConfiguration", &req).await
    }

    async fn set_station_configuration(
        &self,
        ctx: &CallContext,
        req: SetStationConfigurationRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "SetStationConfiguration", &req).await
    }

    async fn get_site(&self, ctx: &CallContext, req: GetSiteRequest) -> McomResult<GetSiteReply> {
        self.call(ctx, "GetSite", &req).await
    }

    async fn list_site_materials(
        &self,
        ctx: &CallContext,
        req: ListSiteMaterialsRequest,
    ) -> McomResult<ListSiteMaterialsReply> {
        self.call(ctx, "ListSiteMaterials", &req).await
    }

    async fn list_site_type(&self, ctx: &CallContext) -> McomResult<ListSiteTypesReply> {
        self.call(ctx, "ListSiteType", &json!({})).await
    }

    async fn list_site_sub_type(&self, ctx: &CallContext) -> McomResult<ListSiteTypesReply> {
        self.call(ctx, "ListSiteSubType", &json!({})).await
    }

    async fn list_material_resource_identities(
        &self,
        ctx: &CallContext,
        req: ListMaterialResourceIdentitiesRequest,
    ) -> McomResult<ListMaterialResourceIdentitiesReply> {
        self.call(ctx, "ListMaterialResourceIdentities", &req).await
    }

    async fn material_resource_bind_v2(
        &self,
        ctx: &CallContext,
        req: MaterialResourceBindRequestV2,
    ) -> McomResult<()> {
        self.call_unit(ctx, "MaterialResourceBindV2", &req).await
    }

    async fn tool_resource_bind_v2(
        &self,
        ctx: &CallContext,
        req: ToolResourceBindRequestV2,
    ) -> McomResult<()> {
        self.call_unit(ctx, "ToolResourceBindV2", &req).await
    }

    async fn get_tool_resource(
        &self,
        ctx: &CallContext,
        req: GetToolResourceRequest,
    ) -> McomResult<GetToolResourceReply> {
        self.call(ctx, "GetToolResource", &req).await
    }

    async fn get_work_order(
        &self,
        ctx: &CallContext,
        req: GetWorkOrderRequest,
    ) -> McomResult<WorkOrder> {
        self.call(ctx, "GetWorkOrder", &req).await
    }

    async fn create_work_orders(
        &self,
        ctx: &CallContext,
        req: CreateWorkOrdersRequest,
    ) -> McomResult<CreateWorkOrdersReply> {
        self.call(ctx, "CreateWorkOrders", &req).await
    }

    async fn update_work_orders(
        &self,
        ctx: &CallContext,
        req: UpdateWorkOrdersRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "UpdateWorkOrders", &req).await
    }

    async fn list_work_orders_by_duration(
        &self,
        ctx: &CallContext,
        req: ListWorkOrdersByDurationRequest,
    ) -> McomResult<ListWorkOrdersByDurationReply> {
        self.call(ctx, "ListWorkOrdersByDuration", &req).await
    }

    async fn get_batch(&self, ctx: &CallContext, req: GetBatchRequest) -> McomResult<GetBatchReply> {
        self.call(ctx, "GetBatch", &req).await
    }

    async fn create_batch(&self, ctx: &CallContext, req: CreateBatchRequest) -> McomResult<()> {
        self.call_unit(ctx, "CreateBatch", &req).await
    }

    async fn update_batch(&self, ctx: &CallContext, req: UpdateBatchRequest) -> McomResult<()> {
        self.call_unit(ctx, "UpdateBatch", &req).await
    }

    async fn feed(&self, ctx: &CallContext, req: FeedRequest) -> McomResult<()> {
        self.call_unit(ctx, "Feed", &req).await
    }

    async fn create_collect_record(
        &self,
        ctx: &CallContext,
        req: CreateCollectRecordRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "CreateCollectRecord", &req).await
    }

    async fn get_limitary_hour(
        &self,
        ctx: &CallContext,
        req: GetLimitaryHourRequest,
    ) -> McomResult<GetLimitaryHourReply> {
        self.call(ctx, "GetLimitaryHour", &req).await
    }

    async fn create_material_resources(
        &self,
        ctx: &CallContext,
        req: CreateMaterialResourcesRequest,
    ) -> McomResult<CreateMaterialResourcesReply> {
        self.call(ctx, "CreateMaterialResources", &req).await
    }

    async fn split_material_resource(
        &self,
        ctx: &CallContext,
        req: SplitMaterialResourceRequest,
    ) -> McomResult<SplitMaterialResourceReply> {
        self.call(ctx, "SplitMaterialResource", &req).await
    }

    async fn get_material_resource(
        &self,
        ctx: &CallContext,
        req: GetMaterialResourceRequest,
    ) -> McomResult<GetMaterialResourceReply> {
        self.call(ctx, "GetMaterialResource", &req).await
    }

    async fn list_material_resource_status(
        &self,
        ctx: &CallContext,
    ) -> McomResult<ListMaterialResourceStatusReply> {
        self.call(ctx, "ListMaterialResourceStatus", &json!({})).await
    }

    async fn get_resource_warehouse(
        &self,
        ctx: &CallContext,
        req: GetResourceWarehouseRequest,
    ) -> McomResult<Warehouse> {
        self.call(ctx, "GetResourceWarehouse", &req).await
    }

    async fn warehousing_stock(
        &self,
        ctx: &CallContext,
        req: WarehousingStockRequest,
    ) -> McomResult<()> {
        self.call_unit(ctx, "WarehousingStock", &req).await
    }

    async fn get_process_definition(
        &self,
        ctx: &CallContext,
        req: GetProcessDefinitionRequest,
    ) -> McomResult<ProcessDefinition> {
        self.call(ctx, "GetProcessDefinition", &req).await
    }

    async fn get_recipe(
        &self,
        ctx: &CallContext,
        req: GetRecipeRequest,
    ) -> McomResult<GetRecipeReply> {
        self.call(ctx, "GetRecipe", &req).await
    }

    async fn list_recipes_by_product(
        &self,
        ctx: &CallContext,
        req: ListRecipesByProductRequest,
    ) -> McomResult<ListRecipesByProductReply> {
        self.call(ctx, "ListRecipesByProduct", &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> McomClient {
        McomClient::new(&server.base_url(), None).unwrap()
    }

    #[actix_web::test]
    async fn test_call_sends_user_and_decodes_reply() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetToolResource")
                    .header("x-user-id", "u1")
                    .json_body(json!({"resource_id": "T-1"}));
                then.status(200).json_body(json!({"tool_id": "TOOL"}));
            })
            .await;

        let reply = client(&server)
            .get_tool_resource(
                &CallContext::user("u1"),
                GetToolResourceRequest {
                    resource_id: "T-1".into(),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply.tool_id, "TOOL");
    }

    #[actix_web::test]
    async fn test_error_body_becomes_domain_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetWorkOrder");
                then.status(400)
                    .json_body(json!({"code": 500, "details": "missing"}));
            })
            .await;

        let err = client(&server)
            .get_work_order(
                &CallContext::anonymous(),
                GetWorkOrderRequest { id: "W".into() },
            )
            .await
            .unwrap_err();

        let mcom = err.as_mcom().unwrap();
        assert_eq!(mcom.code, ErrorCode::WorkorderNotFound);
        assert_eq!(mcom.details, "missing");
    }

    #[actix_web::test]
    async fn test_unknown_code_falls_back_to_unspecified() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/SignOut");
                then.status(400).json_body(json!({"code": 12345}));
            })
            .await;

        let err = client(&server)
            .sign_out(
                &CallContext::anonymous(),
                SignOutRequest { token: "t".into() },
            )
            .await
            .unwrap_err();

        assert!(err.is(ErrorCode::Unspecified));
    }

    #[actix_web::test]
    async fn test_unstructured_failure_is_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ListRoles");
                then.status(502).body("bad gateway");
            })
            .await;

        let err = client(&server)
            .list_roles(&CallContext::anonymous())
            .await
            .unwrap_err();

        assert!(matches!(err, DataManagerError::Transport(_)));
    }
}
