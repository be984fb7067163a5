//! Error detail constants used throughout the application.

// Authentication
pub const ERR_INVALID_USER: &str = "invalid user";
pub const ERR_TOKEN_EXPIRED: &str = "token expired";
pub const ERR_AUTH_REQUIRED: &str = "authentication required";
pub const ERR_REQUEST_TIMEOUT: &str = "request timeout";

// Station
pub const ERR_WRONG_SITE_ACTION_MODE: &str = "wrong site action mode";
pub const ERR_READ_SITE_ON_UPDATE: &str = "not allow READ site on update station";

// Site binding
pub const ERR_MATERIAL_NOT_IN_RECIPE: &str = "material resource not in recipe";
pub const ERR_TOOL_NOT_IN_RECIPE: &str = "tool resource not in recipe";
pub const ERR_MATERIAL_NOT_AVAILABLE: &str = "material resource not available";
pub const ERR_MISSING_BIND_RESOURCE: &str = "missing resource to bind";

// Work order
pub const ERR_STATUS_NOT_PENDING: &str = "work order status not pending";
pub const ERR_STATUS_NOT_ACTIVE_OR_CLOSING: &str = "work order status not active or closing";
pub const ERR_STATUS_OUT_OF_RANGE: &str = "status not within the specified range";
pub const ERR_STANDARD_VALUE_MISSING: &str = "some step standard value is nil";
pub const ERR_MISSING_BATCH_COUNT_OR_QUANTITY: &str = "missing batch count or quantity";
pub const ERR_INVALID_BATCH_SIZE: &str = "invalid enum value of batch size";
pub const ERR_NO_SHEET: &str = "no sheet";
pub const ERR_FILE_EMPTY: &str = "file empty";
pub const ERR_MISSING_UPLOAD_FILE: &str = "missing upload file";

// Produce
pub const ERR_NO_MES_PATH: &str = "no mes path";
pub const ERR_MES_INTERNAL: &str = "mes internal error";

// UI
pub const ERR_OPERATOR_SITE_EMPTY: &str = "operator site is empty.";
pub const ERR_COLLECT_QUANTITY_TYPE: &str = "collect quantity type is invalid number.";
