//! Payloads exchanged with the MES agents and the MES resource API.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal as the agents read it: `value * 10^exp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyDecimal {
    pub value: i64,
    pub exp: i64,
}

impl From<Decimal> for NotifyDecimal {
    fn from(d: Decimal) -> Self {
        let mantissa = d.mantissa();
        let value = i64::try_from(mantissa).unwrap_or(if mantissa < 0 { i64::MIN } else { i64::MAX });
        Self {
            value,
            exp: -i64::from(d.scale()),
        }
    }
}

/// Decimal as the MES resource API reads it; the coefficient is a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDecimal {
    pub exp: i32,
    pub value: String,
}

impl From<Decimal> for ApiDecimal {
    fn from(d: Decimal) -> Self {
        Self {
            exp: -(d.scale() as i32),
            value: d.mantissa().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub station: String,
    pub name: String,
    pub index: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteResource {
    #[serde(rename = "ID")]
    pub id: String,
}

impl SiteResource {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

/// Resources bound to a site and whether any of them is unusable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteBindingState {
    pub resources: Vec<SiteResource>,
    #[serde(rename = "notOK")]
    pub not_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyBindResource {
    pub bind_type: i32,
    pub site: Site,
    pub current_state: SiteBindingState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyWorkOrderClosed {
    #[serde(rename = "workOrderID")]
    pub work_order_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecimalLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<NotifyDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<NotifyDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<NotifyDecimal>,
}

impl DecimalLimits {
    pub fn new(max: Option<Decimal>, mid: Option<Decimal>, min: Option<Decimal>) -> Self {
        Self {
            max: max.map(Into::into),
            mid: mid.map(Into::into),
            min: min.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeParameter {
    pub name: String,
    pub value: DecimalLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeToolItem {
    #[serde(rename = "ID")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMaterial {
    #[serde(rename = "ID")]
    pub id: String,
    pub grade: String,
    pub quantity: DecimalLimits,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub controls: Vec<RecipeParameter>,
    pub materials: Vec<StepMaterial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedWorkOrder {
    #[serde(rename = "ID")]
    pub id: String,
    pub collected_sequence: i64,
    pub current_batch: i64,
    pub plan_batch_count: i64,
    pub plan_quantity: NotifyDecimal,
    #[serde(rename = "productID")]
    pub product_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedRecipe {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<NotifyDecimal>,
    pub common_controls: Vec<RecipeParameter>,
    pub common_properties: Vec<RecipeParameter>,
    pub tools: Vec<RecipeToolItem>,
    pub process_steps: Vec<ProcessStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteState {
    pub site: Site,
    pub current_state: SiteBindingState,
}

/// Sent when an operator loads a work order on a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyWorkOrderStart {
    #[serde(rename = "operatorID")]
    pub operator_id: String,
    pub work_order: LoadedWorkOrder,
    pub recipe: LoadedRecipe,
    pub sites: Vec<SiteState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionMode {
    ActionAuto,
    ActionForce,
}

impl ActionMode {
    pub fn forced(force: bool) -> Self {
        if force {
            ActionMode::ActionForce
        } else {
            ActionMode::ActionAuto
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResourceAction {
    pub action_mode: ActionMode,
    pub work_order: String,
    pub batch: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceId {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceFeed {
    pub resource: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<ApiDecimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFeedRequest {
    pub check: CheckResourceAction,
    pub close_batch: bool,
    pub according_recipe: bool,
    pub feeds: Vec<ResourceFeed>,
}

/// Error reported by the MES; `code` is the symbolic error name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub details: String,
}

pub const MES_ERROR_NONE: &str = "ERROR_NONE";
pub const MES_ERROR_INTERNAL: &str = "ERROR_INTERNAL";

impl CheckError {
    pub fn is_none(&self) -> bool {
        self.code.is_empty() || self.code == MES_ERROR_NONE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceResult {
    #[serde(default)]
    pub error: CheckError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFeedReply {
    #[serde(default)]
    pub results: Option<Vec<ResourceResult>>,
    #[serde(default)]
    pub enforceable: bool,
    #[serde(default)]
    pub enforce_done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectFeed {
    pub according_recipe: bool,
    pub feeds: Vec<ResourceFeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectRequest {
    pub action_mode: ActionMode,
    pub work_order: String,
    pub carrier: String,
    pub sequence: i32,
    pub quantity: ApiDecimal,
    pub resource: ResourceId,
    pub feed: CollectFeed,
    pub label_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelTime {
    #[serde(default)]
    pub nano: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelField {
    #[serde(default)]
    pub time: Option<LabelTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectReply {
    #[serde(default)]
    pub error: Option<CheckError>,
    #[serde(default)]
    pub enforceable: bool,
    #[serde(default)]
    pub enforce_done: bool,
    #[serde(default)]
    pub label_fields: HashMap<String, LabelField>,
}
