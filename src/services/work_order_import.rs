//! Turns the rows of a work order spreadsheet into work orders to create.
//!
//! Sheet columns, after a header row:
//! A product ID, B station, C version stage, D recipe ID, E process name,
//! F process type, G batch size mode (0 fixed, 1 plan), H batch count or plan
//! quantity, I recipe batch size, J date.

use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::{ERR_FILE_EMPTY, ERR_NO_SHEET};
use crate::errors::ApiError;
use crate::mcom::{
    BatchQuantityDetails, CallContext, CreateWorkOrder, DataManager, ErrorCode,
    GetProcessDefinitionRequest, GetRecipeReply, ListRecipesByProductRequest, Order,
    ProcessDefinition,
};
use crate::models::FailedRow;
use crate::utils::decimal::parse_decimal;
use crate::utils::excel::{column_letter, read_first_sheet, ExcelError, Row};

const COL_PRODUCT_ID: usize = 0;
const COL_STATION: usize = 1;
const COL_VERSION_STAGE: usize = 2;
const COL_RECIPE_ID: usize = 3;
const COL_PROCESS_NAME: usize = 4;
const COL_PROCESS_TYPE: usize = 5;
const COL_BATCH_SIZE_MODE: usize = 6;
const COL_BATCH_SIZE_DATA: usize = 7;
const COL_RECIPE_BATCH_SIZE: usize = 8;
const COL_DATE: usize = 9;

/// Work orders ready to create, or the rows that prevent it.
#[derive(Debug)]
pub enum ImportOutcome {
    Ready(Vec<CreateWorkOrder>),
    Rejected(Vec<FailedRow>),
}

impl From<ExcelError> for ApiError {
    fn from(err: ExcelError) -> Self {
        match err {
            ExcelError::NoSheet => ApiError::mcom(ErrorCode::InsufficientRequest, ERR_NO_SHEET),
            ExcelError::Read(e) => ApiError::internal(e),
        }
    }
}

pub struct WorkOrderImporter<'a> {
    dm: &'a Arc<dyn DataManager>,
    ctx: &'a CallContext,
    department: &'a str,
}

impl<'a> WorkOrderImporter<'a> {
    pub fn new(dm: &'a Arc<dyn DataManager>, ctx: &'a CallContext, department: &'a str) -> Self {
        Self {
            dm,
            ctx,
            department,
        }
    }

    pub async fn parse_workbook(&self, bytes: Vec<u8>) -> Result<ImportOutcome, ApiError> {
        let rows = read_first_sheet(bytes)?;
        self.parse_rows(rows).await
    }

    pub async fn parse_rows(&self, rows: Vec<Row>) -> Result<ImportOutcome, ApiError> {
        let mut rows = rows.into_iter();
        let header = rows.next().unwrap_or_default();
        let body: Vec<(usize, Row)> = rows
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .collect();
        if body.is_empty() {
            return Err(ApiError::mcom(ErrorCode::InsufficientRequest, ERR_FILE_EMPTY));
        }

        let mut orders = Vec::with_capacity(body.len());
        let mut failures = Vec::new();
        for (i, row) in body {
            match self.parse_row(&row).await? {
                Ok(order) => orders.push(order),
                Err(columns) => failures.push(FailedRow {
                    index: i + 2,
                    columns: columns
                        .into_iter()
                        .map(|c| format!("{}({})", column_letter(c), header.column(c)))
                        .collect(),
                }),
            }
        }

        if failures.is_empty() {
            Ok(ImportOutcome::Ready(orders))
        } else {
            debug!("{} rows rejected in work order upload", failures.len());
            Ok(ImportOutcome::Rejected(failures))
        }
    }

    /// The work order of one row, or the failing column indices. Data manager
    /// failures other than an unknown process abort the whole import.
    async fn parse_row(&self, row: &Row) -> Result<Result<CreateWorkOrder, Vec<usize>>, ApiError> {
        let station = row.column(COL_STATION);
        let mut failed = Vec::new();
        let mut recipe_id = row.column(COL_RECIPE_ID).to_string();
        let mut process_oid = String::new();
        let mut batch_size = None;

        if recipe_id.is_empty() {
            if row.column(COL_PRODUCT_ID).is_empty() {
                failed.push(COL_PRODUCT_ID);
            } else {
                match self.latest_recipe(row).await {
                    Ok(recipe) => {
                        recipe_id = recipe.id;
                        if let Some((oid, size)) = recipe
                            .processes
                            .iter()
                            .find_map(|p| config_batch_size(&p.info, station).map(|s| (p.info.oid.clone(), s)))
                        {
                            process_oid = oid;
                            batch_size = size;
                        }
                    }
                    Err(columns) => failed.extend(columns),
                }
            }
        } else {
            let reply = self
                .dm
                .get_process_definition(
                    self.ctx,
                    GetProcessDefinitionRequest {
                        recipe_id: recipe_id.clone(),
                        process_name: row.column(COL_PROCESS_NAME).to_string(),
                        process_type: row.column(COL_PROCESS_TYPE).to_string(),
                    },
                )
                .await;
            match reply {
                Ok(process) => {
                    if process.output.id != row.column(COL_PRODUCT_ID) {
                        failed.push(COL_PRODUCT_ID);
                    }
                    if process.config_for(station).is_none() {
                        failed.push(COL_STATION);
                    }
                    batch_size = config_batch_size(&process, station).flatten();
                    process_oid = process.oid;
                }
                Err(e) if e.is(ErrorCode::ProcessNotFound) || e.is(ErrorCode::InsufficientRequest) => {
                    failed.extend([COL_RECIPE_ID, COL_PROCESS_NAME, COL_PROCESS_TYPE]);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let quantity = parse_batch_quantity(batch_size, row);
        if let Err(columns) = &quantity {
            failed.extend(columns);
        }
        let date = NaiveDate::parse_from_str(row.column(COL_DATE), "%Y-%m-%d");
        if date.is_err() {
            failed.push(COL_DATE);
        }

        match (quantity, date) {
            (Ok(batches_quantity), Ok(date)) if failed.is_empty() => Ok(Ok(CreateWorkOrder {
                process_oid,
                recipe_id,
                process_name: row.column(COL_PROCESS_NAME).to_string(),
                process_type: row.column(COL_PROCESS_TYPE).to_string(),
                department_id: self.department.to_string(),
                station: station.to_string(),
                date,
                batches_quantity,
                parent: String::new(),
            })),
            _ => Ok(Err(failed)),
        }
    }

    /// Most recently released recipe of the row's product matching its version
    /// stage, process and station.
    async fn latest_recipe(&self, row: &Row) -> Result<GetRecipeReply, Vec<usize>> {
        let mut failed = Vec::new();
        let recipes = match self
            .dm
            .list_recipes_by_product(
                self.ctx,
                ListRecipesByProductRequest {
                    product_id: row.column(COL_PRODUCT_ID).to_string(),
                    order_by: vec![Order::desc("released_at")],
                },
            )
            .await
        {
            Ok(reply) => reply.recipes,
            Err(_) => {
                failed.push(COL_PRODUCT_ID);
                Vec::new()
            }
        };

        let stage = row.column(COL_VERSION_STAGE);
        let staged: Vec<&GetRecipeReply> = recipes
            .iter()
            .filter(|r| !stage.is_empty() && r.version.stage == stage)
            .collect();
        if staged.is_empty() {
            failed.push(COL_VERSION_STAGE);
        }

        let with_process: Vec<&GetRecipeReply> = staged
            .into_iter()
            .filter(|r| r.processes.iter().any(|p| process_matches(&p.info, row)))
            .collect();
        if with_process.is_empty() {
            failed.extend([COL_PROCESS_NAME, COL_PROCESS_TYPE]);
        }

        let station = row.column(COL_STATION);
        let found = with_process.into_iter().find(|r| {
            r.processes
                .iter()
                .any(|p| process_matches(&p.info, row) && p.info.config_for(station).is_some())
        });
        if found.is_none() {
            failed.push(COL_STATION);
        }

        match found {
            Some(recipe) if failed.is_empty() => Ok(recipe.clone()),
            _ => {
                failed.sort_unstable();
                Err(failed)
            }
        }
    }
}

fn process_matches(process: &ProcessDefinition, row: &Row) -> bool {
    process.name == row.column(COL_PROCESS_NAME)
        && process.process_type == row.column(COL_PROCESS_TYPE)
        && process.output.id == row.column(COL_PRODUCT_ID)
}

/// Batch size of the config serving the station; `None` when no config does.
fn config_batch_size(process: &ProcessDefinition, station: &str) -> Option<Option<Decimal>> {
    process.config_for(station).map(|c| c.batch_size)
}

/// Batch plan of a row. The recipe batch size falls back to column I when the
/// recipe has none.
fn parse_batch_quantity(batch_size: Option<Decimal>, row: &Row) -> Result<BatchQuantityDetails, Vec<usize>> {
    let batch_size = batch_size
        .filter(|s| !s.is_zero())
        .or_else(|| parse_decimal(row.column(COL_RECIPE_BATCH_SIZE)))
        .filter(|s| !s.is_zero());

    match row.column(COL_BATCH_SIZE_MODE) {
        "0" => {
            let count = row
                .column(COL_BATCH_SIZE_DATA)
                .parse::<u32>()
                .ok()
                .filter(|c| *c > 0)
                .ok_or_else(|| vec![COL_BATCH_SIZE_DATA])?;
            let size = batch_size.ok_or_else(|| vec![COL_RECIPE_BATCH_SIZE])?;
            let plan = Decimal::from(count)
                .checked_mul(size)
                .ok_or_else(|| vec![COL_BATCH_SIZE_DATA])?;
            Ok(BatchQuantityDetails::fixed(count, plan))
        }
        "1" => {
            let quantity = parse_decimal(row.column(COL_BATCH_SIZE_DATA))
                .filter(|q| !q.is_zero())
                .ok_or_else(|| vec![COL_BATCH_SIZE_DATA])?;
            let size = batch_size.ok_or_else(|| vec![COL_RECIPE_BATCH_SIZE])?;
            let count = quantity
                .checked_div(size)
                .ok_or_else(|| vec![COL_BATCH_SIZE_DATA])?
                .ceil()
                .to_u32()
                .ok_or_else(|| vec![COL_BATCH_SIZE_DATA])?;
            Ok(BatchQuantityDetails::plan(count, quantity))
        }
        _ => Err(vec![COL_BATCH_SIZE_MODE, COL_BATCH_SIZE_DATA]),
    }
}
