//! Work order scheduling and lifecycle.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use log::info;
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::constants::{
    ERR_INVALID_BATCH_SIZE, ERR_MISSING_BATCH_COUNT_OR_QUANTITY, ERR_STANDARD_VALUE_MISSING,
    ERR_STATUS_NOT_ACTIVE_OR_CLOSING, ERR_STATUS_NOT_PENDING, ERR_STATUS_OUT_OF_RANGE,
};
use crate::errors::ApiError;
use crate::mcom::{
    BatchQuantityDetails, BatchSize, BatchStatus, BatchSummary, CallContext, CreateWorkOrder,
    CreateWorkOrdersRequest, DataManager, ErrorCode, GetBatchRequest, GetProcessDefinitionRequest,
    GetStationRequest, GetWorkOrderRequest, ListWorkOrdersByDurationRequest, Order,
    PaginationRequest, RecipeProcessStep, RecipeProperty, SiteSubType, UpdateWorkOrder,
    UpdateWorkOrdersRequest, WorkOrder, WorkOrderStatus,
};
use crate::mes::{
    self, DecimalLimits, LoadedRecipe, LoadedWorkOrder, MesClient, NotifyWorkOrderClosed,
    NotifyWorkOrderStart, ProcessStep, RecipeParameter, RecipeToolItem, SiteState, StepMaterial,
};
use crate::models::{
    BatchQuantityRequest, ChangeWorkOrderStatusRequest, CreateSchedulingRequest, InformationMaterial,
    InformationRecipe, InformationTool, PaginatedData, Principal, SchedulingData,
    UpdateSchedulingRequest, UpdateWorkOrderRequest, UploadWorkOrdersData, WorkOrderInformationData,
    WorkOrderListItem, WorkOrderRateData, WorkOrderRecipeData,
};
use crate::services::site_state::material_binding_state;
use crate::services::work_order_import::{ImportOutcome, WorkOrderImporter};
use crate::utils::decimal::decimal_to_f64;
use crate::validators::{require_decimal, require_decimals};

const START_WORK_ORDER: i64 = 0;
const CLOSE_WORK_ORDER: i64 = 1;

/// Days before the work date from which a station's work orders are listed.
const WORK_ORDER_LOOKBACK_DAYS: i64 = 9;

pub struct WorkOrderService {
    dm: Arc<dyn DataManager>,
    mes: MesClient,
    settings: Arc<Settings>,
}

impl WorkOrderService {
    pub fn new(dm: Arc<dyn DataManager>, mes: MesClient, settings: Arc<Settings>) -> Self {
        Self { dm, mes, settings }
    }

    /// Work orders of a station on one day, in scheduled order.
    pub async fn list_scheduling(
        &self,
        principal: &Principal,
        station: &str,
        date: NaiveDate,
    ) -> Result<Vec<SchedulingData>, ApiError> {
        let reply = self
            .dm
            .list_work_orders_by_duration(
                &CallContext::user(&principal.id),
                ListWorkOrdersByDurationRequest {
                    since: Some(date),
                    until: Some(date),
                    station: station.to_string(),
                    order_by: ListWorkOrdersByDurationRequest::reserved_order(),
                    ..Default::default()
                },
            )
            .await?;

        reply
            .contents
            .into_iter()
            .map(|wo| -> Result<SchedulingData, ApiError> {
                let summary = summary_of(&wo)?;
                let per_batch = !summary.per_batch_quantity.is_empty();
                Ok(SchedulingData {
                    batch_size: wo.batch_quantity_details.batch_quantity_type,
                    department_oid: wo.department_id,
                    plan_date: wo.date,
                    product_id: wo.product.id,
                    recipe: WorkOrderRecipeData {
                        id: wo.recipe_id,
                        process_oid: wo.process.oid,
                        process_name: wo.process.name,
                        process_type: wo.process.process_type,
                    },
                    sequence: wo.sequence,
                    station: wo.station,
                    status: wo.status.value(),
                    update_at: wo.updated_at,
                    update_by: wo.updated_by,
                    parent_id: wo.parent,
                    batches_quantity: summary.per_batch_quantity.iter().map(|q| q.to_string()).collect(),
                    batch_count: (!per_batch).then_some(summary.batch_count),
                    plan_quantity: (!per_batch).then(|| summary.plan_quantity.to_string()),
                    id: wo.id,
                })
            })
            .collect()
    }

    pub async fn create_scheduling(
        &self,
        principal: &Principal,
        requests: Vec<CreateSchedulingRequest>,
    ) -> Result<Vec<String>, ApiError> {
        let work_orders = requests
            .into_iter()
            .map(|req| {
                Ok(CreateWorkOrder {
                    batches_quantity: creation_batch_quantity(&req.quantity)?,
                    process_oid: req.recipe.process_oid,
                    recipe_id: req.recipe.id,
                    process_name: req.recipe.process_name,
                    process_type: req.recipe.process_type,
                    department_id: req.department_oid,
                    station: req.station,
                    date: req.plan_date,
                    parent: req.parent_id,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        let reply = self
            .dm
            .create_work_orders(&CallContext::user(&principal.id), CreateWorkOrdersRequest { work_orders })
            .await?;
        info!("{} work orders created by {}", reply.ids.len(), principal.id);
        Ok(reply.ids)
    }

    /// Reorders scheduled work orders, or skips those marked to abort.
    pub async fn update_scheduling(
        &self,
        principal: &Principal,
        requests: Vec<UpdateSchedulingRequest>,
    ) -> Result<(), ApiError> {
        let orders = requests
            .into_iter()
            .map(|req| {
                if req.force_to_abort {
                    UpdateWorkOrder {
                        id: req.id,
                        status: Some(WorkOrderStatus::Skipped),
                        ..Default::default()
                    }
                } else {
                    UpdateWorkOrder {
                        id: req.id,
                        sequence: Some(req.sequence),
                        ..Default::default()
                    }
                }
            })
            .collect();
        self.dm
            .update_work_orders(&CallContext::user(&principal.id), UpdateWorkOrdersRequest { orders })
            .await?;
        Ok(())
    }

    /// Edits a work order that has not started yet.
    pub async fn update(
        &self,
        principal: &Principal,
        id: &str,
        req: UpdateWorkOrderRequest,
    ) -> Result<(), ApiError> {
        let batches_quantity = update_batch_quantity(&req.quantity)?;
        let ctx = CallContext::user(&principal.id);

        let work_order = self
            .dm
            .get_work_order(&ctx, GetWorkOrderRequest { id: id.to_string() })
            .await?;
        if work_order.status != WorkOrderStatus::Pending {
            return Err(ApiError::mcom(ErrorCode::BadRequest, ERR_STATUS_NOT_PENDING));
        }

        self.dm
            .update_work_orders(
                &ctx,
                UpdateWorkOrdersRequest {
                    orders: vec![UpdateWorkOrder {
                        id: id.to_string(),
                        station: Some(req.station),
                        recipe_id: Some(req.recipe.id),
                        process_oid: Some(req.recipe.process_oid),
                        process_name: Some(req.recipe.process_name),
                        process_type: Some(req.recipe.process_type),
                        date: Some(req.plan_date),
                        batches_quantity: Some(batches_quantity),
                        ..Default::default()
                    }],
                },
            )
            .await?;
        Ok(())
    }

    /// Open work orders of a station from a few days before the work date on.
    pub async fn list(
        &self,
        principal: &Principal,
        station: &str,
        work_date: NaiveDate,
    ) -> Result<Vec<WorkOrderListItem>, ApiError> {
        let reply = self
            .dm
            .list_work_orders_by_duration(
                &CallContext::user(&principal.id),
                ListWorkOrdersByDurationRequest {
                    since: Some(work_date - Duration::days(WORK_ORDER_LOOKBACK_DAYS)),
                    station: station.to_string(),
                    order_by: ListWorkOrdersByDurationRequest::reserved_order(),
                    ..Default::default()
                },
            )
            .await?;

        reply
            .contents
            .into_iter()
            .filter(|wo| {
                matches!(
                    wo.status,
                    WorkOrderStatus::Pending | WorkOrderStatus::Active | WorkOrderStatus::Closing
                )
            })
            .map(|wo| -> Result<WorkOrderListItem, ApiError> {
                let summary = summary_of(&wo)?;
                Ok(WorkOrderListItem {
                    work_order_id: wo.id,
                    recipe_id: wo.recipe_id,
                    product_id: wo.product.id,
                    product_type: wo.product.product_type,
                    work_order_status: wo.status.value(),
                    plan_quantity: summary.plan_quantity.to_string(),
                    date: wo.date,
                })
            })
            .collect()
    }

    /// Completion of the department's work orders between two dates.
    pub async fn list_rate(
        &self,
        principal: &Principal,
        department: &str,
        since: NaiveDate,
        until: NaiveDate,
        pagination: Option<PaginationRequest>,
        order_by: Vec<Order>,
    ) -> Result<PaginatedData<WorkOrderRateData>, ApiError> {
        let ctx = CallContext::user(&principal.id);
        let reply = self
            .dm
            .list_work_orders_by_duration(
                &ctx,
                ListWorkOrdersByDurationRequest {
                    since: Some(since),
                    until: Some(until),
                    department_id: department.to_string(),
                    pagination,
                    order_by,
                    ..Default::default()
                },
            )
            .await?;

        let mut items = Vec::with_capacity(reply.contents.len());
        for wo in reply.contents {
            let summary = summary_of(&wo)?;
            let production_time = self.production_time(&ctx, &wo).await?;
            let production_end_time = if wo.status == WorkOrderStatus::Closed {
                wo.updated_at.format("%Y-%m-%d").to_string()
            } else {
                String::new()
            };
            items.push(WorkOrderRateData {
                ratio: completion_ratio(
                    decimal_to_f64(wo.collected_quantity),
                    decimal_to_f64(summary.plan_quantity),
                ),
                department_id: wo.department_id,
                work_order_id: wo.id,
                product_id: wo.product.id,
                station: wo.station,
                plan_quantity: summary.plan_quantity.to_string(),
                collected_quantity: wo.collected_quantity.to_string(),
                production_time,
                production_end_time,
                update_by: wo.updated_by,
                created_by: wo.inserted_by,
                recipe_id: wo.recipe_id,
            });
        }
        Ok(PaginatedData::new(items, reply.amount_of_data))
    }

    /// Date of the first feed of batch 1 once the work order has started.
    async fn production_time(&self, ctx: &CallContext, wo: &WorkOrder) -> Result<String, ApiError> {
        let started = matches!(
            wo.status,
            WorkOrderStatus::Active | WorkOrderStatus::Closing | WorkOrderStatus::Closed
        );
        if !started || wo.current_batch <= 0 {
            return Ok(String::new());
        }
        let batch = self
            .dm
            .get_batch(
                ctx,
                GetBatchRequest {
                    work_order: wo.id.clone(),
                    number: 1,
                },
            )
            .await?;
        let fed = matches!(
            batch.info.status,
            BatchStatus::Started | BatchStatus::Closing | BatchStatus::Closed
        );
        Ok(batch
            .info
            .records
            .first()
            .filter(|_| fed)
            .map(|r| r.time.format("%Y-%m-%d").to_string())
            .unwrap_or_default())
    }

    /// Starts a pending work order or closes a running one. Closing notifies the
    /// station's MES agent.
    pub async fn change_status(
        &self,
        principal: &Principal,
        id: &str,
        req: ChangeWorkOrderStatusRequest,
    ) -> Result<(), ApiError> {
        let abnormality = req.remark.checked_add(1).ok_or_else(|| {
            ApiError::mcom(ErrorCode::InvalidNumber, format!("invalid_number={}", req.remark))
        })?;
        let ctx = CallContext::user(&principal.id);
        let work_order = self
            .dm
            .get_work_order(&ctx, GetWorkOrderRequest { id: id.to_string() })
            .await?;

        let status = match req.change_type {
            START_WORK_ORDER if work_order.status == WorkOrderStatus::Pending => WorkOrderStatus::Active,
            START_WORK_ORDER => return Err(ApiError::mcom(ErrorCode::BadRequest, ERR_STATUS_NOT_PENDING)),
            CLOSE_WORK_ORDER
                if matches!(work_order.status, WorkOrderStatus::Active | WorkOrderStatus::Closing) =>
            {
                WorkOrderStatus::Closed
            }
            CLOSE_WORK_ORDER => {
                return Err(ApiError::mcom(ErrorCode::BadRequest, ERR_STATUS_NOT_ACTIVE_OR_CLOSING))
            }
            _ => return Err(ApiError::mcom(ErrorCode::BadRequest, ERR_STATUS_OUT_OF_RANGE)),
        };

        self.dm
            .update_work_orders(
                &ctx,
                UpdateWorkOrdersRequest {
                    orders: vec![UpdateWorkOrder {
                        id: id.to_string(),
                        status: Some(status),
                        abnormality: Some(abnormality),
                        ..Default::default()
                    }],
                },
            )
            .await?;
        info!("Work order {} changed to {} by {}", id, status, principal.id);

        if status == WorkOrderStatus::Closed {
            if let Some(url) = self.settings.closed_work_order_url(&work_order.station) {
                let body = NotifyWorkOrderClosed {
                    work_order_id: id.to_string(),
                };
                self.mes.notify_detached(url, body);
            }
        }
        Ok(())
    }

    /// Work order details with its recipe for the station. The station's MES
    /// agent, when configured, is told the work order is being loaded.
    pub async fn information(
        &self,
        principal: &Principal,
        id: &str,
    ) -> Result<WorkOrderInformationData, ApiError> {
        let ctx = CallContext::user(&principal.id);
        let work_order = self
            .dm
            .get_work_order(&ctx, GetWorkOrderRequest { id: id.to_string() })
            .await?;
        let summary = summary_of(&work_order)?;
        let process = self
            .dm
            .get_process_definition(
                &ctx,
                GetProcessDefinitionRequest {
                    recipe_id: work_order.recipe_id.clone(),
                    process_name: work_order.process.name.clone(),
                    process_type: work_order.process.process_type.clone(),
                },
            )
            .await?;

        let mut recipe = InformationRecipe::default();
        let mut loaded = LoadedRecipe {
            id: work_order.recipe_id.clone(),
            ..Default::default()
        };
        let mut steps: &[RecipeProcessStep] = &[];
        for config in process.configs.iter().filter(|c| c.has_station(&work_order.station)) {
            loaded.common_controls.extend(recipe_parameters(&config.common_controls));
            loaded.common_properties.extend(recipe_parameters(&config.common_properties));
            for tool in &config.tools {
                recipe.tools.push(InformationTool {
                    id: tool.id.clone(),
                    necessity: tool.required,
                });
                loaded.tools.push(RecipeToolItem { id: tool.id.clone() });
            }
            let (materials, process_steps) = aggregate_materials(&config.steps)?;
            recipe.materials.extend(materials);
            loaded.process_steps.extend(process_steps);
            loaded.batch_size = config.batch_size.map(Into::into);
            steps = &config.steps;
        }

        if let Some(url) = self.settings.load_work_order_url(&work_order.station) {
            let station = self
                .dm
                .get_station(
                    &ctx,
                    GetStationRequest {
                        id: work_order.station.clone(),
                    },
                )
                .await
                .map_err(ApiError::internal)?;
            let sites = station
                .sites
                .iter()
                .filter(|s| s.information.sub_type == SiteSubType::Material)
                .map(|s| {
                    let mut state = material_binding_state(
                        s.information.site_type,
                        s.information.sub_type,
                        &s.content,
                        steps,
                    );
                    if state.resources.is_empty() {
                        state.not_ok = true;
                    }
                    SiteState {
                        site: mes::Site {
                            station: s.information.station.clone(),
                            name: s.information.name.clone(),
                            index: s.information.index,
                        },
                        current_state: state,
                    }
                })
                .collect();
            let body = NotifyWorkOrderStart {
                operator_id: principal.id.clone(),
                work_order: LoadedWorkOrder {
                    id: id.to_string(),
                    collected_sequence: i64::from(work_order.collected_sequence),
                    current_batch: i64::from(work_order.current_batch),
                    plan_batch_count: summary.batch_count,
                    plan_quantity: summary.plan_quantity.into(),
                    product_id: work_order.product.id.clone(),
                },
                recipe: loaded,
                sites,
            };
            self.mes.notify_detached(url, body);
        }

        Ok(WorkOrderInformationData {
            work_order_id: work_order.id,
            product_id: work_order.product.id,
            product_type: work_order.product.product_type,
            recipe_id: work_order.recipe_id,
            date: work_order.date,
            work_order_status: work_order.status.value(),
            collect_sequence: work_order.collected_sequence,
            plan_quantity: summary.plan_quantity.to_string(),
            current_batch: work_order.current_batch,
            current_quantity: decimal_to_f64(work_order.collected_quantity),
            recipe,
        })
    }

    /// Creates the work orders of an uploaded spreadsheet. Nothing is created when
    /// any row fails; the failing rows are returned instead.
    pub async fn import(
        &self,
        principal: &Principal,
        department: &str,
        workbook: Vec<u8>,
    ) -> Result<UploadWorkOrdersData, ApiError> {
        let ctx = CallContext::user(&principal.id);
        let outcome = WorkOrderImporter::new(&self.dm, &ctx, department)
            .parse_workbook(workbook)
            .await?;
        match outcome {
            ImportOutcome::Rejected(fail_data) => Ok(UploadWorkOrdersData { fail_data }),
            ImportOutcome::Ready(work_orders) => {
                let count = work_orders.len();
                self.dm
                    .create_work_orders(&ctx, CreateWorkOrdersRequest { work_orders })
                    .await?;
                info!("{} work orders imported into {} by {}", count, department, principal.id);
                Ok(UploadWorkOrdersData::default())
            }
        }
    }
}

fn summary_of(wo: &WorkOrder) -> Result<BatchSummary, ApiError> {
    wo.batch_quantity_details.summary().map_err(ApiError::Internal)
}

/// `collected/plan*100` up to the plan, decreasing again beyond it.
fn completion_ratio(collected: f64, plan: f64) -> String {
    let ratio = if collected <= plan {
        collected / plan * 100.0
    } else {
        100.0 - (collected - plan) / plan * 100.0
    };
    format!("{:.2}%", ratio)
}

fn creation_batch_quantity(req: &BatchQuantityRequest) -> Result<BatchQuantityDetails, ApiError> {
    let per_batch = require_decimals(&req.batches_quantity)?;
    match BatchSize::try_from(req.batch_size) {
        Ok(BatchSize::PerBatchQuantities) => {
            if per_batch.is_empty() {
                return Err(ApiError::mcom(ErrorCode::InsufficientRequest, ""));
            }
            Ok(BatchQuantityDetails::per_batch(per_batch))
        }
        Ok(size @ (BatchSize::FixedQuantity | BatchSize::PlanQuantity)) => {
            let count = u32::try_from(req.batch_count)
                .ok()
                .filter(|c| *c > 0)
                .ok_or_else(|| ApiError::mcom(ErrorCode::InsufficientRequest, ""))?;
            let quantity = require_decimal(&req.plan_quantity)?;
            Ok(batch_plan(size, count, quantity))
        }
        Err(_) => Err(ApiError::mcom(
            ErrorCode::InvalidNumber,
            format!("no implementation with {} of BatchSize", req.batch_size),
        )),
    }
}

fn update_batch_quantity(req: &BatchQuantityRequest) -> Result<BatchQuantityDetails, ApiError> {
    match BatchSize::try_from(req.batch_size) {
        Ok(BatchSize::PerBatchQuantities) => {
            Ok(BatchQuantityDetails::per_batch(require_decimals(&req.batches_quantity)?))
        }
        Ok(size @ (BatchSize::FixedQuantity | BatchSize::PlanQuantity)) => {
            let quantity = require_decimal(&req.plan_quantity)?;
            let count = u32::try_from(req.batch_count).ok().filter(|c| *c > 0);
            match count {
                Some(count) if quantity > Decimal::ZERO => {
                    Ok(batch_plan(size, count, quantity))
                }
                _ => Err(ApiError::mcom(
                    ErrorCode::InsufficientRequest,
                    ERR_MISSING_BATCH_COUNT_OR_QUANTITY,
                )),
            }
        }
        Err(_) => Err(ApiError::mcom(ErrorCode::BadRequest, ERR_INVALID_BATCH_SIZE)),
    }
}

fn batch_plan(size: BatchSize, count: u32, quantity: Decimal) -> BatchQuantityDetails {
    if size == BatchSize::FixedQuantity {
        BatchQuantityDetails::fixed(count, quantity)
    } else {
        BatchQuantityDetails::plan(count, quantity)
    }
}

fn recipe_parameters(properties: &[RecipeProperty]) -> Vec<RecipeParameter> {
    properties
        .iter()
        .map(|p| RecipeParameter {
            name: p.name.clone(),
            value: DecimalLimits::new(p.param.high, p.param.mid, p.param.low),
        })
        .collect()
}

/// Recipe materials summed by name, in first-seen order, plus the steps as the
/// MES agent reads them. Every material needs a standard value.
fn aggregate_materials(
    steps: &[RecipeProcessStep],
) -> Result<(Vec<InformationMaterial>, Vec<ProcessStep>), ApiError> {
    let mut materials: Vec<InformationMaterial> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut process_steps = Vec::with_capacity(steps.len());

    for step in steps {
        let mut process_step = ProcessStep {
            controls: recipe_parameters(&step.controls),
            materials: Vec::with_capacity(step.materials.len()),
        };
        for material in &step.materials {
            let mid = material
                .value
                .mid
                .ok_or_else(|| ApiError::mcom(ErrorCode::Unspecified, ERR_STANDARD_VALUE_MISSING))?;
            match positions.get(material.name.as_str()) {
                Some(&i) => materials[i].standard_value += decimal_to_f64(mid),
                None => {
                    positions.insert(&material.name, materials.len());
                    materials.push(InformationMaterial {
                        id: material.name.clone(),
                        site_name: material.site.clone(),
                        standard_value: decimal_to_f64(mid),
                    });
                }
            }
            process_step.materials.push(StepMaterial {
                id: material.name.clone(),
                grade: material.grade.clone(),
                quantity: DecimalLimits::new(material.value.max, material.value.mid, material.value.min),
            });
        }
        process_steps.push(process_step);
    }
    Ok((materials, process_steps))
}
