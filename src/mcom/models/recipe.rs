//! Recipes and their process definitions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DecimalRange, Order, Product};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyParam {
    pub high: Option<Decimal>,
    pub mid: Option<Decimal>,
    pub low: Option<Decimal>,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeProperty {
    pub name: String,
    pub param: PropertyParam,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMaterial {
    pub name: String,
    #[serde(default)]
    pub grade: String,
    pub value: DecimalRange,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub required_recipe_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeProcessStep {
    #[serde(default)]
    pub controls: Vec<RecipeProperty>,
    #[serde(default)]
    pub materials: Vec<RecipeMaterial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeTool {
    pub id: String,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeProcessConfig {
    pub stations: Vec<String>,
    pub batch_size: Option<Decimal>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub tools: Vec<RecipeTool>,
    #[serde(default)]
    pub steps: Vec<RecipeProcessStep>,
    #[serde(default)]
    pub common_controls: Vec<RecipeProperty>,
    #[serde(default)]
    pub common_properties: Vec<RecipeProperty>,
}

impl RecipeProcessConfig {
    pub fn has_station(&self, station: &str) -> bool {
        self.stations.iter().any(|s| s == station)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub oid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub process_type: String,
    pub output: Product,
    #[serde(default)]
    pub configs: Vec<RecipeProcessConfig>,
}

impl ProcessDefinition {
    /// The first config serving the station.
    pub fn config_for(&self, station: &str) -> Option<&RecipeProcessConfig> {
        self.configs.iter().find(|c| c.has_station(station))
    }

    /// The last config serving the station; later configs override earlier ones.
    pub fn last_config_for(&self, station: &str) -> Option<&RecipeProcessConfig> {
        self.configs.iter().rev().find(|c| c.has_station(station))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProcessDefinitionRequest {
    pub recipe_id: String,
    pub process_name: String,
    pub process_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeOptionalFlow {
    pub name: String,
    pub max_repetitions: i32,
    #[serde(default)]
    pub processes: Vec<ProcessDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessEntity {
    pub info: ProcessDefinition,
    #[serde(default)]
    pub optional_flows: Vec<RecipeOptionalFlow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeVersion {
    pub major: String,
    pub minor: String,
    pub stage: String,
    pub released_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetRecipeReply {
    pub id: String,
    pub product: Product,
    pub version: RecipeVersion,
    #[serde(default)]
    pub processes: Vec<ProcessEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRecipeRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecipesByProductRequest {
    pub product_id: String,
    pub order_by: Vec<Order>,
}

impl ListRecipesByProductRequest {
    /// Newest recipes first: stage, then major, then minor version descending.
    pub fn newest_first(product_id: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            order_by: vec![Order::desc("stage"), Order::desc("major"), Order::desc("minor")],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecipesByProductReply {
    pub recipes: Vec<GetRecipeReply>,
}
