//! Recipe response models.
//!
//! Two views are served: active recipes of a product with the recipes their
//! materials can be produced by, and the full process list of one recipe with
//! its BOM and control tables per station.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BomStationData {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "batchSize")]
    pub batch_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BomProcessData {
    #[serde(rename = "OID")]
    pub oid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub process_type: String,
    pub stations: Vec<BomStationData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BomRecipeData {
    #[serde(rename = "ID")]
    pub id: String,
    pub processes: Vec<BomProcessData>,
}

/// A material of a station BOM and the recipes producing it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BomItemData {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub quantity: String,
    pub recipes: Vec<BomRecipeData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationInfoData {
    #[serde(rename = "ID")]
    pub id: String,
    pub batch_size: String,
    pub bom_list: Vec<BomItemData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProcessInfoData {
    #[serde(rename = "OID")]
    pub oid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub process_type: String,
    pub stations: Vec<StationInfoData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecipeProcessesData {
    #[serde(rename = "ID")]
    pub id: String,
    pub processes: Vec<ProcessInfoData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BomData {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub grade: String,
    pub max_value: String,
    pub standard_value: String,
    pub min_value: String,
    #[serde(rename = "requiredRecipeID")]
    pub required_recipe_id: String,
    /// Substitute product IDs followed by their grade
    pub substitutes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ControlColumn {
    pub name: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ControlCell {
    pub name: String,
    pub value: String,
}

/// Step controls as a table: one row per step, one column per control name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ControlTable {
    pub columns: Vec<ControlColumn>,
    pub rows: Vec<Vec<ControlCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonControlData {
    pub max_value: String,
    pub min_value: String,
    pub row_name: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct StationControlData {
    pub step: ControlTable,
    pub common: Vec<CommonControlData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationBomData {
    #[serde(rename = "ID")]
    pub id: String,
    pub bom_list: Vec<BomData>,
    pub control: StationControlData,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProcessProductData {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "type")]
    pub product_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecipeProcessDetail {
    pub name: String,
    #[serde(rename = "type")]
    pub process_type: String,
    pub product: ProcessProductData,
    pub stations: Vec<StationBomData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionalFlowData {
    pub max_repetitions: i32,
    pub name: String,
    pub processes: Vec<RecipeProcessDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeProcessListItem {
    pub optional_flows: Vec<OptionalFlowData>,
    pub required_flows: RecipeProcessDetail,
}
