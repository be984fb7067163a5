//! Function-level permission table built from the service configuration.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::mcom::Role;

wire_enum! {
    /// Every gated REST operation.
    pub enum FunctionOperationId {
        GetServerStatus = 1 => "GET_SERVER_STATUS",
        AddMaterial = 2 => "ADD_MATERIAL",
        AddPlan = 3 => "ADD_PLAN",
        BindResource = 4 => "BIND_RESOURCE",
        ChangeUserPassword = 5 => "CHANGE_USER_PASSWORD",
        ChangeWorkOrderStatus = 6 => "CHANGE_WORK_ORDER_STATUS",
        CreateAccount = 7 => "CREATE_ACCOUNT",
        CreateCarrier = 8 => "CREATE_CARRIER",
        CreateStation = 9 => "CREATE_STATION",
        CreateStationScheduling = 10 => "CREATE_STATION_SCHEDULING",
        CreateWorkOrdersFromFile = 11 => "CREATE_WORK_ORDERS_FROM_FILE",
        DeleteAccount = 12 => "DELETE_ACCOUNT",
        DeleteCarrier = 13 => "DELETE_CARRIER",
        DeleteStation = 14 => "DELETE_STATION",
        FeedCollect = 15 => "FEED_COLLECT",
        GetMaterialResourceInfo = 16 => "GET_MATERIAL_RESOURCE_INFO",
        GetMaterialResourceInfoByType = 17 => "GET_MATERIAL_RESOURCE_INFO_BY_TYPE",
        GetPlanList = 18 => "GET_PLAN_LIST",
        GetProductGroupList = 19 => "GET_PRODUCT_GROUP_LIST",
        GetProductList = 20 => "GET_PRODUCT_LIST",
        GetProductTypeList = 21 => "GET_PRODUCT_TYPE_LIST",
        GetRecipeIds = 22 => "GET_RECIPE_IDS",
        GetRecipeList = 23 => "GET_RECIPE_LIST",
        GetRecipeProcessList = 24 => "GET_RECIPE_PROCESS_LIST",
        GetRoleList = 25 => "GET_ROLE_LIST",
        GetSiteInformation = 26 => "GET_SITE_INFORMATION",
        GetSiteMaterialList = 27 => "GET_SITE_MATERIAL_LIST",
        GetStationConfig = 28 => "GET_STATION_CONFIG",
        GetStationList = 29 => "GET_STATION_LIST",
        GetStationOperator = 30 => "GET_STATION_OPERATOR",
        GetStationScheduling = 31 => "GET_STATION_SCHEDULING",
        GetToolId = 32 => "GET_TOOL_ID",
        GetWarehouseInfo = 33 => "GET_WAREHOUSE_INFO",
        GetWorkOrderInformation = 34 => "GET_WORK_ORDER_INFORMATION",
        ListAuthorizedAccount = 35 => "LIST_AUTHORIZED_ACCOUNT",
        ListCarrier = 36 => "LIST_CARRIER",
        ListDepartmentIds = 37 => "LIST_DEPARTMENT_IDS",
        ListMaterialStatus = 38 => "LIST_MATERIAL_STATUS",
        ListStations = 39 => "LIST_STATIONS",
        ListStationInfo = 40 => "LIST_STATION_INFO",
        ListStationSites = 41 => "LIST_STATION_SITES",
        ListStationState = 42 => "LIST_STATION_STATE",
        ListUnauthorizedAccount = 43 => "LIST_UNAUTHORIZED_ACCOUNT",
        ListWorkOrders = 44 => "LIST_WORK_ORDERS",
        ListWorkOrdersRate = 45 => "LIST_WORK_ORDERS_RATE",
        MesCollect = 46 => "MES_COLLECT",
        MesFeed = 47 => "MES_FEED",
        SetStationConfig = 48 => "SET_STATION_CONFIG",
        SiteSubtypeList = 49 => "SITE_SUBTYPE_LIST",
        SiteTypeList = 50 => "SITE_TYPE_LIST",
        SplitMaterial = 51 => "SPLIT_MATERIAL",
        StationForceSignIn = 52 => "STATION_FORCE_SIGN_IN",
        StationSignOut = 53 => "STATION_SIGN_OUT",
        UpdateAccount = 54 => "UPDATE_ACCOUNT",
        UpdateCarrier = 55 => "UPDATE_CARRIER",
        UpdateStationInfo = 56 => "UPDATE_STATION_INFO",
        UpdateStationScheduling = 57 => "UPDATE_STATION_SCHEDULING",
        UpdateWorkOrder = 58 => "UPDATE_WORK_ORDER",
        WarehouseTransaction = 59 => "WAREHOUSE_TRANSACTION",
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("function {0} was not in the list")]
    UnknownFunction(String),
    #[error("not existed role: {0}")]
    UnknownRole(String),
}

/// Roles allowed to run each function. Functions absent from the table are
/// allowed to nobody.
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    allowed: HashMap<FunctionOperationId, HashSet<Role>>,
}

impl PermissionTable {
    pub fn from_config(config: &HashMap<String, Vec<String>>) -> Result<Self, PermissionError> {
        let mut allowed = HashMap::with_capacity(config.len());
        for (function, roles) in config {
            let id = FunctionOperationId::from_name(function)
                .ok_or_else(|| PermissionError::UnknownFunction(function.clone()))?;
            let roles = roles
                .iter()
                .map(|name| {
                    Role::from_name(name).ok_or_else(|| PermissionError::UnknownRole(name.clone()))
                })
                .collect::<Result<HashSet<_>, _>>()?;
            allowed.insert(id, roles);
        }
        Ok(Self { allowed })
    }

    pub fn has_permission(&self, id: FunctionOperationId, roles: &[Role]) -> bool {
        self.allowed
            .get(&id)
            .is_some_and(|allowed| roles.iter().any(|role| allowed.contains(role)))
    }
}
