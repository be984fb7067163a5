//! Numeric enumerations shared with the data manager.

wire_enum! {
    pub enum Role {
        Administrator = 1 => "ADMINISTRATOR",
        Leader = 2 => "LEADER",
        Planner = 3 => "PLANNER",
        Scheduler = 4 => "SCHEDULER",
        Inspector = 5 => "INSPECTOR",
        QualityController = 6 => "QUALITY_CONTROLLER",
        Operator = 7 => "OPERATOR",
        Bearer = 8 => "BEARER",
    }
}

wire_enum! {
    pub enum WorkOrderStatus {
        Pending = 0 => "PENDING",
        Active = 1 => "ACTIVE",
        Closing = 2 => "CLOSING",
        Closed = 3 => "CLOSED",
        Skipped = 4 => "SKIPPED",
    }
}

wire_enum! {
    pub enum BatchStatus {
        Preparing = 0 => "BATCH_PREPARING",
        Started = 1 => "BATCH_STARTED",
        Closing = 2 => "BATCH_CLOSING",
        Closed = 3 => "BATCH_CLOSED",
        Cancelled = 4 => "BATCH_CANCELLED",
    }
}

wire_enum! {
    /// How the quantities of a work order are expressed.
    pub enum BatchSize {
        PerBatchQuantities = 0 => "PER_BATCH_QUANTITIES",
        FixedQuantity = 1 => "FIXED_QUANTITY",
        PlanQuantity = 2 => "PLAN_QUANTITY",
    }
}

wire_enum! {
    pub enum MaterialStatus {
        Unspecified = 0 => "MATERIAL_STATUS_UNSPECIFIED",
        Inspection = 1 => "INSPECTION",
        Available = 2 => "AVAILABLE",
        Hold = 3 => "HOLD",
        Mounted = 4 => "MOUNTED",
        Unavailable = 5 => "UNAVAILABLE",
    }
}

wire_enum! {
    pub enum SiteType {
        Unspecified = 0 => "TYPE_UNSPECIFIED",
        Container = 1 => "CONTAINER",
        Slot = 2 => "SLOT",
        Collection = 3 => "COLLECTION",
        Queue = 4 => "QUEUE",
        Colqueue = 5 => "COLQUEUE",
    }
}

wire_enum! {
    pub enum SiteSubType {
        Unspecified = 0 => "SUB_TYPE_UNSPECIFIED",
        Operator = 1 => "OPERATOR",
        Material = 2 => "MATERIAL",
        Tool = 3 => "TOOL",
    }
}

wire_enum! {
    /// Site binding actions. Names ending in `CLEAR` empty the site.
    pub enum BindType {
        ContainerBind = 1000 => "RESOURCE_BINDING_CONTAINER_BIND",
        ContainerAdd = 1001 => "RESOURCE_BINDING_CONTAINER_ADD",
        ContainerClear = 1010 => "RESOURCE_BINDING_CONTAINER_CLEAR",
        ContainerClearAdd = 1011 => "RESOURCE_BINDING_CONTAINER_CLEAR_ADD",
        SlotBind = 1101 => "RESOURCE_BINDING_SLOT_BIND",
        SlotClear = 1110 => "RESOURCE_BINDING_SLOT_CLEAR",
        CollectionBind = 1200 => "RESOURCE_BINDING_COLLECTION_BIND",
        CollectionAdd = 1201 => "RESOURCE_BINDING_COLLECTION_ADD",
        CollectionClear = 1210 => "RESOURCE_BINDING_COLLECTION_CLEAR",
        QueueBind = 2100 => "RESOURCE_BINDING_QUEUE_BIND",
        QueueAdd = 2101 => "RESOURCE_BINDING_QUEUE_ADD",
        QueuePush = 2102 => "RESOURCE_BINDING_QUEUE_PUSH",
        QueuePushPop = 2103 => "RESOURCE_BINDING_QUEUE_PUSHPOP",
        QueueRemove = 2104 => "RESOURCE_BINDING_QUEUE_REMOVE",
        QueueClear = 2110 => "RESOURCE_BINDING_QUEUE_CLEAR",
        QueuePop = 2111 => "RESOURCE_BINDING_QUEUE_POP",
        ColqueueBind = 2200 => "RESOURCE_BINDING_COLQUEUE_BIND",
        ColqueueAdd = 2201 => "RESOURCE_BINDING_COLQUEUE_ADD",
        ColqueuePush = 2202 => "RESOURCE_BINDING_COLQUEUE_PUSH",
        ColqueuePushPop = 2203 => "RESOURCE_BINDING_COLQUEUE_PUSHPOP",
        ColqueueRemove = 2204 => "RESOURCE_BINDING_COLQUEUE_REMOVE",
        ColqueueClear = 2210 => "RESOURCE_BINDING_COLQUEUE_CLEAR",
        ColqueuePop = 2211 => "RESOURCE_BINDING_COLQUEUE_POP",
    }
}

impl BindType {
    pub fn is_clear(self) -> bool {
        self.name().ends_with("CLEAR")
    }
}

wire_enum! {
    pub enum StationState {
        Unspecified = 0 => "STATION_STATE_UNSPECIFIED",
        Idle = 1 => "IDLE",
        Running = 2 => "RUNNING",
        Down = 3 => "DOWN",
        Shutdown = 4 => "SHUTDOWN",
        Maintenance = 5 => "MAINTENANCE",
    }
}

wire_enum! {
    /// Action applied to a site when a station is created or edited.
    pub enum SiteActionMode {
        Read = 0 => "READ",
        Add = 1 => "ADD",
        Remove = 2 => "REMOVE",
    }
}

wire_enum! {
    pub enum FeedQuantitySource {
        FromRecipe = 0 => "FROM_RECIPE",
        FromRequest = 1 => "FROM_REQUEST",
    }
}

wire_enum! {
    pub enum CollectQuantitySource {
        FromStationConfigs = 0 => "FROM_STATION_CONFIGS",
        FromStationParams = 1 => "FROM_STATION_PARAMS",
    }
}

impl Default for FeedQuantitySource {
    fn default() -> Self {
        FeedQuantitySource::FromRecipe
    }
}

impl Default for CollectQuantitySource {
    fn default() -> Self {
        CollectQuantitySource::FromStationConfigs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_bind_types() {
        assert!(BindType::SlotClear.is_clear());
        assert!(BindType::ColqueueClear.is_clear());
        assert!(!BindType::ContainerClearAdd.is_clear());
        assert!(!BindType::QueuePush.is_clear());
    }

    #[test]
    fn test_wire_enum_numbers() {
        assert_eq!(serde_json::to_string(&Role::Operator).unwrap(), "7");
        let status: WorkOrderStatus = serde_json::from_str("2").unwrap();
        assert_eq!(status, WorkOrderStatus::Closing);
        assert!(serde_json::from_str::<SiteType>("42").is_err());
        assert_eq!(Role::from_name("BEARER"), Some(Role::Bearer));
        assert_eq!(BatchStatus::Started.to_string(), "BATCH_STARTED");
    }
}
