use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::constants::AUTH_KEY_HEADER;
use crate::models::*;

/// OpenAPI documentation for the MES web API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MUI Server API",
        version = "1.0.0",
        description = "Manufacturing execution REST API over the mcom data manager."
    ),
    servers((url = "http://localhost:8080", description = "Local development server")),
    tags(
        (name = "Account", description = "Login, logout and account authorization"),
        (name = "Station", description = "Station maintenance and sign in/out"),
        (name = "Site", description = "Sites and resource binding"),
        (name = "WorkOrder", description = "Scheduling and work order flow"),
        (name = "Resource", description = "Material and tool resources"),
        (name = "Warehouse", description = "Warehouse stock"),
        (name = "Recipe", description = "Recipes of products"),
        (name = "Carrier", description = "Carriers"),
        (name = "Plan", description = "Production plans"),
        (name = "Product", description = "Product types and IDs"),
        (name = "Produce", description = "Feeding and collecting"),
        (name = "UI", description = "Production flow configuration"),
        (name = "Unspecified", description = "Departments and server status")
    ),
    paths(
        crate::handlers::login,
        crate::handlers::logout,
        crate::handlers::change_password,
        crate::handlers::role_list,
        crate::handlers::list_authorized,
        crate::handlers::list_unauthorized,
        crate::handlers::create_account,
        crate::handlers::update_account,
        crate::handlers::delete_account,
        crate::handlers::get_station_list,
        crate::handlers::list_station_info,
        crate::handlers::create_station,
        crate::handlers::update_station_info,
        crate::handlers::delete_station,
        crate::handlers::list_station_state,
        crate::handlers::list_stations,
        crate::handlers::list_station_sites,
        crate::handlers::force_sign_in,
        crate::handlers::sign_out,
        crate::handlers::list_site_materials,
        crate::handlers::list_site_types,
        crate::handlers::list_site_sub_types,
        crate::handlers::get_site_information,
        crate::handlers::get_station_operator,
        crate::handlers::auto_bind_resource,
        crate::handlers::get_station_scheduling,
        crate::handlers::create_station_scheduling,
        crate::handlers::update_station_scheduling,
        crate::handlers::update_work_order,
        crate::handlers::list_work_orders,
        crate::handlers::list_work_orders_rate,
        crate::handlers::change_work_order_status,
        crate::handlers::get_work_order_information,
        crate::handlers::create_work_orders_from_file,
        crate::handlers::add_material,
        crate::handlers::get_material_resource_info,
        crate::handlers::list_material_status,
        crate::handlers::split_material,
        crate::handlers::get_tool_id,
        crate::handlers::get_warehouse_info,
        crate::handlers::warehouse_transaction,
        crate::handlers::get_recipe_ids,
        crate::handlers::get_recipe_process_list,
        crate::handlers::get_recipe_list,
        crate::handlers::get_carrier_list,
        crate::handlers::create_carrier,
        crate::handlers::update_carrier,
        crate::handlers::delete_carrier,
        crate::handlers::get_plan_list,
        crate::handlers::add_plan,
        crate::handlers::get_product_type_by_department_list,
        crate::handlers::get_product_type_list,
        crate::handlers::get_product_list,
        crate::handlers::get_material_resource_info_by_type,
        crate::handlers::feed_collect,
        crate::handlers::mes_feed,
        crate::handlers::mes_collect,
        crate::handlers::get_product_group_list,
        crate::handlers::set_station_config,
        crate::handlers::get_station_config,
        crate::handlers::list_department_ids,
        crate::handlers::get_server_status
    ),
    components(
        schemas(
            ErrorResponse,
            IdName,
            LoginRequest,
            LoginResponse,
            DepartmentResponse,
            ChangePasswordRequest,
            CreateAccountRequest,
            UpdateAccountRequest,
            AuthorizedAccount,
            UnauthorizedAccount,
            SiteRequest,
            CreateStationRequest,
            UpdateStationRequest,
            OrderRequest,
            ListOrderBody,
            StationSignInRequest,
            StationSiteName,
            StationSignOutRequest,
            StationIdItem,
            OperatorSiteData,
            MaterialSiteData,
            ToolSiteData,
            BoundResourceData,
            SiteContentData,
            SiteData,
            StationData,
            StationListItem,
            SiteAddress,
            StationSiteItem,
            BindResourceItem,
            ForceOption,
            QueueOption,
            AutoBindRequest,
            SiteInformationRequest,
            BindMaterialData,
            SiteInformationData,
            StationOperatorData,
            WorkOrderRecipe,
            BatchQuantityRequest,
            CreateSchedulingRequest,
            UpdateSchedulingRequest,
            UpdateWorkOrderRequest,
            ChangeWorkOrderStatusRequest,
            WorkOrderRecipeData,
            SchedulingData,
            WorkOrderListItem,
            WorkOrderRateData,
            InformationMaterial,
            InformationTool,
            InformationRecipe,
            WorkOrderInformationData,
            FailedRow,
            UploadWorkOrdersData,
            StockWarehouse,
            NewMaterialResource,
            AddMaterialRequest,
            SplitMaterialRequest,
            ResourceIdData,
            ToolIdData,
            InspectionData,
            ResourceWarehouse,
            ResourceMaterialData,
            WarehouseTransactionRequest,
            WarehouseData,
            BomStationData,
            BomProcessData,
            BomRecipeData,
            BomItemData,
            StationInfoData,
            ProcessInfoData,
            RecipeProcessesData,
            BomData,
            ControlColumn,
            ControlCell,
            ControlTable,
            CommonControlData,
            StationControlData,
            StationBomData,
            ProcessProductData,
            RecipeProcessDetail,
            OptionalFlowData,
            RecipeProcessListItem,
            CreateCarrierRequest,
            UpdateCarrierRequest,
            CarrierData,
            AddPlanRequest,
            PlanData,
            ProductTypeData,
            DepartmentIdData,
            FeedSource,
            FeedSection,
            CollectSection,
            FeedCollectRequest,
            ForceFlag,
            FeedResource,
            MesFeedRequest,
            MesCollectRequest,
            MesErrorItem,
            MesResponse,
            SetStationConfigRequest,
            FeedConfigData,
            CollectQuantityData,
            CollectConfigData,
            StationConfigData,
            StationConfigReply,
            ProductGroupData
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the session token header as the `api_key` scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    AUTH_KEY_HEADER,
                    "Token obtained from /api/user/login",
                ))),
            );
        }
    }
}
