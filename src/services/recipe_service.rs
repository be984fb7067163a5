//! Recipe lookups: versions of a product, active recipes with their child
//! recipes, and per-station BOM and control tables of one recipe.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use futures::future::try_join_all;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::ApiError;
use crate::mcom::{
    CallContext, DataManager, GetRecipeReply, GetRecipeRequest, ListMultipleSubstitutionsRequest,
    ListRecipesByProductRequest, Material, ProcessDefinition, RecipeProcessConfig,
    RecipeProcessStep,
};
use crate::models::{
    BomData, BomItemData, BomProcessData, BomRecipeData, BomStationData, CommonControlData,
    ControlCell, ControlColumn, ControlTable, OptionalFlowData, Principal, ProcessInfoData,
    ProcessProductData, RecipeProcessDetail, RecipeProcessListItem, RecipeProcessesData,
    StationBomData, StationControlData, StationInfoData,
};
use crate::utils::decimal::optional_decimal_string;

pub struct RecipeService {
    dm: Arc<dyn DataManager>,
}

/// A process of a recipe, identified by name and type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ProcessRef {
    recipe_id: String,
    name: String,
    process_type: String,
}

impl ProcessRef {
    fn of(recipe_id: &str, process: &ProcessDefinition) -> Self {
        Self {
            recipe_id: recipe_id.to_string(),
            name: process.name.clone(),
            process_type: process.process_type.clone(),
        }
    }
}

/// Where the recipes of a step material are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChildSource {
    Recipe(String),
    Product(String),
}

/// A recipe reduced to the processes producing one product.
struct OutputRecipe {
    id: String,
    processes: Vec<ProcessDefinition>,
}

impl OutputRecipe {
    fn new(product_id: &str, recipe: GetRecipeReply) -> Self {
        let mut processes = Vec::new();
        for entity in recipe.processes {
            if entity.info.output.id == product_id {
                processes.push(entity.info);
            }
            for flow in entity.optional_flows {
                processes.extend(flow.processes.into_iter().filter(|p| p.output.id == product_id));
            }
        }
        Self {
            id: recipe.id,
            processes,
        }
    }
}

type ChildRecipes = HashMap<ProcessRef, Vec<GetRecipeReply>>;

impl RecipeService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    /// Recipe IDs of a product, newest first.
    pub async fn recipe_ids(&self, principal: &Principal, product_id: &str) -> Result<Vec<String>, ApiError> {
        let reply = self
            .dm
            .list_recipes_by_product(
                &CallContext::user(&principal.id),
                ListRecipesByProductRequest::newest_first(product_id),
            )
            .await?;
        Ok(reply.recipes.into_iter().map(|r| r.id).collect())
    }

    /// Processes producing the product, each station listing the recipes its
    /// materials can be made with.
    pub async fn active_recipes(
        &self,
        principal: &Principal,
        product_id: &str,
    ) -> Result<Vec<RecipeProcessesData>, ApiError> {
        let ctx = CallContext::user(&principal.id);
        let reply = self
            .dm
            .list_recipes_by_product(&ctx, ListRecipesByProductRequest::newest_first(product_id))
            .await?;
        let recipes: Vec<OutputRecipe> = reply
            .recipes
            .into_iter()
            .map(|r| OutputRecipe::new(product_id, r))
            .collect();

        let children = self.child_recipes(&ctx, &recipes).await?;
        Ok(compose_processes(&recipes, &children))
    }

    /// Recipes of every step material, fetched concurrently. A process is keyed
    /// once it has at least one material.
    async fn child_recipes(&self, ctx: &CallContext, recipes: &[OutputRecipe]) -> Result<ChildRecipes, ApiError> {
        let mut seen = HashSet::new();
        let mut lookups: Vec<(ProcessRef, ChildSource)> = Vec::new();
        for recipe in recipes {
            for process in &recipe.processes {
                let key = ProcessRef::of(&recipe.id, process);
                if !seen.insert(key.clone()) {
                    continue;
                }
                for source in child_sources(&process.configs) {
                    lookups.push((key.clone(), source));
                }
            }
        }
        debug!("Resolving {} child recipe lookups", lookups.len());

        let fetched = try_join_all(lookups.iter().map(|(key, source)| async move {
            let recipes = self.fetch_children(ctx, source).await?;
            Ok::<_, ApiError>((key, recipes))
        }))
        .await?;

        let mut children = ChildRecipes::new();
        for (key, recipes) in fetched {
            children.entry(key.clone()).or_default().extend(recipes);
        }
        Ok(children)
    }

    async fn fetch_children(&self, ctx: &CallContext, source: &ChildSource) -> Result<Vec<GetRecipeReply>, ApiError> {
        match source {
            ChildSource::Recipe(id) => {
                let recipe = self.dm.get_recipe(ctx, GetRecipeRequest { id: id.clone() }).await?;
                Ok(vec![recipe])
            }
            ChildSource::Product(id) => {
                let reply = self
                    .dm
                    .list_recipes_by_product(ctx, ListRecipesByProductRequest::newest_first(id))
                    .await?;
                Ok(reply.recipes)
            }
        }
    }

    /// Required and optional flows of a recipe with the BOM and control tables
    /// of each station.
    pub async fn process_list(
        &self,
        principal: &Principal,
        recipe_id: &str,
    ) -> Result<Vec<RecipeProcessListItem>, ApiError> {
        let ctx = CallContext::user(&principal.id);
        let recipe = self
            .dm
            .get_recipe(&ctx, GetRecipeRequest { id: recipe_id.to_string() })
            .await?;

        let all_processes = recipe.processes.iter().flat_map(|entity| {
            entity
                .optional_flows
                .iter()
                .flat_map(|flow| flow.processes.iter())
                .chain(std::iter::once(&entity.info))
        });
        let substitutes = self.substitutes(&ctx, unique_materials(all_processes)).await?;

        Ok(recipe
            .processes
            .iter()
            .map(|entity| RecipeProcessListItem {
                optional_flows: entity
                    .optional_flows
                    .iter()
                    .map(|flow| OptionalFlowData {
                        max_repetitions: flow.max_repetitions,
                        name: flow.name.clone(),
                        processes: flow.processes.iter().map(|p| process_detail(p, &substitutes)).collect(),
                    })
                    .collect(),
                required_flows: process_detail(&entity.info, &substitutes),
            })
            .collect())
    }

    /// Substitutes of each material formatted as ID followed by grade.
    async fn substitutes(
        &self,
        ctx: &CallContext,
        materials: Vec<Material>,
    ) -> Result<HashMap<(String, String), Vec<String>>, ApiError> {
        if materials.is_empty() {
            return Ok(HashMap::new());
        }
        let reply = self
            .dm
            .list_multiple_substitutions(ctx, ListMultipleSubstitutionsRequest { product_ids: materials })
            .await?;
        Ok(reply
            .reply
            .into_iter()
            .map(|s| {
                let formatted = s
                    .substitutions
                    .iter()
                    .map(|m| format!("{}{}", m.id, m.grade))
                    .collect();
                ((s.product.id, s.product.grade), formatted)
            })
            .collect())
    }
}

fn child_sources(configs: &[RecipeProcessConfig]) -> Vec<ChildSource> {
    let mut sources = Vec::new();
    let materials = configs
        .iter()
        .flat_map(|c| c.steps.iter())
        .flat_map(|s| s.materials.iter());
    for material in materials {
        let source = if material.required_recipe_id.is_empty() {
            ChildSource::Product(material.name.clone())
        } else {
            ChildSource::Recipe(material.required_recipe_id.clone())
        };
        if !sources.contains(&source) {
            sources.push(source);
        }
    }
    sources
}

/// Processes with child recipes are listed; when no process has any, all are.
fn compose_processes(recipes: &[OutputRecipe], children: &ChildRecipes) -> Vec<RecipeProcessesData> {
    let list_all = children.is_empty();
    recipes
        .iter()
        .map(|recipe| RecipeProcessesData {
            id: recipe.id.clone(),
            processes: recipe
                .processes
                .iter()
                .filter_map(|process| {
                    let related = children.get(&ProcessRef::of(&recipe.id, process));
                    if related.is_none() && !list_all {
                        return None;
                    }
                    Some(ProcessInfoData {
                        oid: process.oid.clone(),
                        name: process.name.clone(),
                        process_type: process.process_type.clone(),
                        stations: station_infos(&process.configs, related.map(Vec::as_slice).unwrap_or(&[])),
                    })
                })
                .collect(),
        })
        .collect()
}

fn station_infos(configs: &[RecipeProcessConfig], recipes: &[GetRecipeReply]) -> Vec<StationInfoData> {
    let mut stations = Vec::new();
    for config in configs {
        let batch_size = optional_decimal_string(config.batch_size);
        let bom_list = bom_list(recipes, &sum_bom(&config.steps));
        for station in &config.stations {
            stations.push(StationInfoData {
                id: station.clone(),
                batch_size: batch_size.clone(),
                bom_list: bom_list.clone(),
            });
        }
    }
    stations
}

/// Standard quantities summed per material, in first-seen order.
fn sum_bom(steps: &[RecipeProcessStep]) -> Vec<(String, Decimal)> {
    let mut bom: Vec<(String, Decimal)> = Vec::new();
    for material in steps.iter().flat_map(|s| s.materials.iter()) {
        let Some(quantity) = material.value.mid else {
            continue;
        };
        match bom.iter_mut().find(|(name, _)| *name == material.name) {
            Some((_, total)) => *total = total.saturating_add(quantity),
            None => bom.push((material.name.clone(), quantity)),
        }
    }
    bom
}

/// Materials with at least one recipe producing them.
fn bom_list(recipes: &[GetRecipeReply], bom: &[(String, Decimal)]) -> Vec<BomItemData> {
    let mut items = Vec::new();
    for (product_id, quantity) in bom {
        let mut seen = HashSet::new();
        let mut bom_recipes = Vec::new();
        for recipe in recipes {
            for entity in recipe.processes.iter().filter(|e| e.info.output.id == *product_id) {
                let info = &entity.info;
                if !seen.insert(ProcessRef::of(&recipe.id, info)) {
                    continue;
                }
                let processes = info
                    .configs
                    .iter()
                    .map(|config| {
                        let batch_size = optional_decimal_string(config.batch_size);
                        BomProcessData {
                            oid: info.oid.clone(),
                            name: info.name.clone(),
                            process_type: info.process_type.clone(),
                            stations: config
                                .stations
                                .iter()
                                .map(|s| BomStationData {
                                    id: s.clone(),
                                    batch_size: batch_size.clone(),
                                })
                                .collect(),
                        }
                    })
                    .collect();
                bom_recipes.push(BomRecipeData {
                    id: recipe.id.clone(),
                    processes,
                });
            }
        }
        if !bom_recipes.is_empty() {
            items.push(BomItemData {
                product_id: product_id.clone(),
                quantity: quantity.to_string(),
                recipes: bom_recipes,
            });
        }
    }
    items
}

fn unique_materials<'a>(processes: impl Iterator<Item = &'a ProcessDefinition>) -> Vec<Material> {
    let mut materials: Vec<Material> = Vec::new();
    let step_materials = processes
        .flat_map(|p| p.configs.iter())
        .flat_map(|c| c.steps.iter())
        .flat_map(|s| s.materials.iter());
    for material in step_materials {
        let candidate = Material {
            id: material.name.clone(),
            grade: material.grade.clone(),
        };
        if !materials.contains(&candidate) {
            materials.push(candidate);
        }
    }
    materials
}

fn process_detail(
    process: &ProcessDefinition,
    substitutes: &HashMap<(String, String), Vec<String>>,
) -> RecipeProcessDetail {
    let controls = control_tables(&process.configs);
    let mut stations = Vec::new();
    for config in &process.configs {
        let bom: Vec<BomData> = config
            .steps
            .iter()
            .flat_map(|s| s.materials.iter())
            .map(|m| BomData {
                product_id: m.name.clone(),
                grade: m.grade.clone(),
                max_value: optional_decimal_string(m.value.max),
                standard_value: optional_decimal_string(m.value.mid),
                min_value: optional_decimal_string(m.value.min),
                required_recipe_id: m.required_recipe_id.clone(),
                substitutes: substitutes
                    .get(&(m.name.clone(), m.grade.clone()))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();
        for station in &config.stations {
            stations.push(StationBomData {
                id: station.clone(),
                bom_list: bom.clone(),
                control: controls.get(station).cloned().unwrap_or_default(),
            });
        }
    }
    RecipeProcessDetail {
        name: process.name.clone(),
        process_type: process.process_type.clone(),
        product: ProcessProductData {
            id: process.output.id.clone(),
            product_type: process.output.product_type.clone(),
        },
        stations,
    }
}

/// Control tables per station. Columns are the control names of all steps,
/// sorted; a step without a control leaves its cell empty.
fn control_tables(configs: &[RecipeProcessConfig]) -> HashMap<String, StationControlData> {
    let mut tables = HashMap::new();
    for config in configs {
        let units: BTreeMap<&str, &str> = config
            .steps
            .iter()
            .flat_map(|s| s.controls.iter())
            .map(|c| (c.name.as_str(), c.param.unit.as_str()))
            .collect();

        let rows = config
            .steps
            .iter()
            .map(|step| {
                units
                    .keys()
                    .map(|&name| ControlCell {
                        name: name.to_string(),
                        value: step
                            .controls
                            .iter()
                            .rev()
                            .find(|c| c.name == name)
                            .map(|c| optional_decimal_string(c.param.mid))
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .collect();

        let table = StationControlData {
            step: ControlTable {
                columns: units
                    .iter()
                    .map(|(&name, &unit)| ControlColumn {
                        name: name.to_string(),
                        unit: unit.to_string(),
                    })
                    .collect(),
                rows,
            },
            common: config
                .common_controls
                .iter()
                .map(|c| CommonControlData {
                    max_value: optional_decimal_string(c.param.high),
                    min_value: optional_decimal_string(c.param.low),
                    row_name: c.name.clone(),
                    unit: c.param.unit.clone(),
                })
                .collect(),
        };
        for station in &config.stations {
            tables.insert(station.clone(), table.clone());
        }
    }
    tables
}
