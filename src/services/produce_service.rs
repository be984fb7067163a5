//! Feeding and collecting, either recorded directly in the data manager or forwarded
//! to the MES resource API.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use log::{info, warn};
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::constants::{ERR_MES_INTERNAL, ERR_NO_MES_PATH};
use crate::errors::ApiError;
use crate::mcom::{
    BatchId, BatchStatus, CallContext, CarrierAction, CreateBatchRequest, CreateCollectRecordRequest,
    CreateMaterialResource, CreateMaterialResourcesRequest, DataManager, ErrorCode, FeedPerSite,
    FeedQuantitySource, FeedRequest, GetBatchRequest, GetCarrierRequest, GetLimitaryHourReply,
    GetLimitaryHourRequest, GetStationConfigurationRequest, GetStationRequest, GetWorkOrderRequest,
    MaterialStatus, SiteId, UniqueSite, UpdateBatchRequest, UpdateCarrierRequest,
};
use crate::mes::{
    ActionMode, CheckResourceAction, CollectFeed, CollectReply, CollectRequest, MesClient,
    MesHeader, ResourceFeed, ResourceFeedReply, ResourceFeedRequest, ResourceId,
    MES_ERROR_INTERNAL,
};
use crate::models::{
    FeedCollectRequest, FeedSource, MesCollectRequest, MesErrorItem, MesFeedRequest, MesResponse,
    Principal,
};
use crate::utils::decimal::parse_decimal;
use crate::validators::{require_decimal, require_float_decimal};

const MES_FEED_PATH: &str = "/mes/api/v2/resource/feed";
const MES_COLLECT_PATH: &str = "/mes/api/v2/resource/collect";
const LABEL_FIELDS: [&str; 2] = ["manufacture_date", "expiry"];

pub struct ProduceService {
    dm: Arc<dyn DataManager>,
    mes: MesClient,
    settings: Arc<Settings>,
}

impl ProduceService {
    pub fn new(dm: Arc<dyn DataManager>, mes: MesClient, settings: Arc<Settings>) -> Self {
        Self { dm, mes, settings }
    }

    /// Feeds a batch, closes it and records the produced resource.
    pub async fn feed_collect(
        &self,
        principal: &Principal,
        work_order_id: &str,
        req: FeedCollectRequest,
    ) -> Result<(), ApiError> {
        let ctx = CallContext::user(&principal.id);
        let work_order = self
            .dm
            .get_work_order(&ctx, GetWorkOrderRequest { id: work_order_id.to_string() })
            .await?;

        let batch_number = req.feed.batch;
        let status = match self
            .dm
            .get_batch(
                &ctx,
                GetBatchRequest {
                    work_order: work_order.id.clone(),
                    number: batch_number,
                },
            )
            .await
        {
            Ok(reply) => reply.info.status,
            Err(e) if e.is(ErrorCode::BatchNotFound) => {
                self.dm
                    .create_batch(
                        &ctx,
                        CreateBatchRequest {
                            work_order: work_order_id.to_string(),
                            number: batch_number,
                            status: BatchStatus::Started,
                        },
                    )
                    .await?;
                BatchStatus::Started
            }
            Err(e) => return Err(e.into()),
        };
        if !matches!(status, BatchStatus::Preparing | BatchStatus::Started) {
            return Err(ApiError::mcom(
                ErrorCode::Unspecified,
                format!("bad status: status={}", status.name()),
            ));
        }

        self.dm
            .feed(
                &ctx,
                FeedRequest {
                    batch: BatchId {
                        work_order: work_order_id.to_string(),
                        number: batch_number,
                    },
                    feed_content: feed_content(&req.feed.source)?,
                },
            )
            .await?;
        self.dm
            .update_batch(
                &ctx,
                UpdateBatchRequest {
                    work_order: work_order_id.to_string(),
                    number: batch_number,
                    status: BatchStatus::Closing,
                },
            )
            .await?;

        let station = self
            .dm
            .get_station(&ctx, GetStationRequest { id: req.station_id.clone() })
            .await?;
        let collect = &req.collect;
        let lot_number = lot_number(
            collect.group,
            &station.information.code,
            collect.work_date,
        );

        let carrier = collect.carrier_resource.as_str();
        if !carrier.is_empty() {
            self.dm
                .get_carrier(&ctx, GetCarrierRequest { id: carrier.to_string() })
                .await?;
        }

        let limitary = match self
            .dm
            .get_limitary_hour(
                &ctx,
                GetLimitaryHourRequest {
                    product_type: work_order.product.product_type.clone(),
                },
            )
            .await
        {
            Ok(reply) => reply,
            Err(e) if e.is(ErrorCode::LimitaryHourNotFound) => GetLimitaryHourReply::default(),
            Err(e) => return Err(e.into()),
        };
        let now = Utc::now();
        let expiry_time = now + Duration::hours(i64::from(limitary.limitary_hour.max));
        let quantity = require_float_decimal(collect.quantity)?;

        let created = self
            .dm
            .create_material_resources(
                &ctx,
                CreateMaterialResourcesRequest {
                    materials: vec![CreateMaterialResource {
                        product_type: work_order.product.product_type.clone(),
                        id: work_order.product.id.clone(),
                        grade: String::new(),
                        status: MaterialStatus::Available,
                        quantity,
                        unit: work_order.unit.clone(),
                        lot_number: lot_number.clone(),
                        production_time: now,
                        expiry_time,
                        resource_id: collect.resource_id.clone(),
                        carrier_id: carrier.to_string(),
                    }],
                    stock_in: None,
                },
            )
            .await?;
        let resource = created
            .resources
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::internal("no material resource created"))?;

        if !carrier.is_empty() {
            self.dm
                .update_carrier(
                    &ctx,
                    UpdateCarrierRequest {
                        id: carrier.to_string(),
                        action: CarrierAction::ClearResources,
                    },
                )
                .await?;
            self.dm
                .update_carrier(
                    &ctx,
                    UpdateCarrierRequest {
                        id: carrier.to_string(),
                        action: CarrierAction::BindResources {
                            resource_ids: vec![resource.id.clone()],
                        },
                    },
                )
                .await?;
        }

        self.dm
            .create_collect_record(
                &ctx,
                CreateCollectRecordRequest {
                    work_order: work_order_id.to_string(),
                    lot_number: lot_number.clone(),
                    sequence: collect.sequence,
                    quantity,
                    station: req.station_id.clone(),
                    resource_oid: resource.oid,
                },
            )
            .await?;

        if collect.print {
            warn!("Label printing requested for lot {} is not supported", lot_number);
        }
        info!(
            "Work order {} batch {} fed and collected as lot {} by {}",
            work_order_id, batch_number, lot_number, principal.id
        );
        Ok(())
    }

    fn mes_url(&self, path: &str) -> Result<String, ApiError> {
        if self.settings.mes_path.is_empty() {
            return Err(ApiError::internal(ERR_NO_MES_PATH));
        }
        Ok(format!("{}{}", self.settings.mes_path, path))
    }

    pub async fn mes_feed(
        &self,
        principal: &Principal,
        station_id: &str,
        request_id: &str,
        req: MesFeedRequest,
    ) -> Result<MesResponse, ApiError> {
        let url = self.mes_url(MES_FEED_PATH)?;
        let config = self
            .dm
            .get_station_configuration(
                &CallContext::user(&principal.id),
                GetStationConfigurationRequest {
                    station_id: station_id.to_string(),
                },
            )
            .await?;

        let according_recipe = config.feed.quantity_source == FeedQuantitySource::FromRecipe;
        let feeds = req
            .resource
            .iter()
            .map(|r| {
                let quantity = if according_recipe {
                    None
                } else {
                    Some(positive_quantity(&r.quantity)?.into())
                };
                Ok(ResourceFeed {
                    resource: ResourceId { id: r.id.clone() },
                    quantity,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        let body = ResourceFeedRequest {
            check: CheckResourceAction {
                action_mode: ActionMode::forced(req.force_feed.force),
                work_order: req.work_order_id,
                batch: req.batch,
            },
            close_batch: req.close_batch,
            according_recipe,
            feeds,
        };
        let site = if config.split_feed_and_collect {
            first_site_name(&config.feed.operator_sites)
        } else {
            String::new()
        };
        let header = mes_header(principal, station_id, site, request_id);

        let reply: ResourceFeedReply = self.mes.send(&url, &header, &body).await?;
        Ok(feed_response(reply))
    }

    pub async fn mes_collect(
        &self,
        principal: &Principal,
        station_id: &str,
        request_id: &str,
        req: MesCollectRequest,
    ) -> Result<MesResponse, ApiError> {
        let url = self.mes_url(MES_COLLECT_PATH)?;
        let ctx = CallContext::user(&principal.id);
        let config = self
            .dm
            .get_station_configuration(
                &ctx,
                GetStationConfigurationRequest {
                    station_id: station_id.to_string(),
                },
            )
            .await?;
        let quantity = require_decimal(&req.quantity)?;
        self.dm
            .get_work_order(&ctx, GetWorkOrderRequest { id: req.work_order_id.clone() })
            .await?;

        let (site, feeds) = if config.split_feed_and_collect {
            (first_site_name(&config.collect.operator_sites), vec![])
        } else {
            let feeds = req
                .feed_resource_ids
                .iter()
                .map(|id| ResourceFeed {
                    resource: ResourceId { id: id.clone() },
                    quantity: None,
                })
                .collect();
            (String::new(), feeds)
        };

        let body = CollectRequest {
            action_mode: ActionMode::forced(req.force_collect.force),
            work_order: req.work_order_id,
            carrier: req.carrier_resource,
            sequence: req.sequence,
            quantity: quantity.into(),
            resource: ResourceId { id: req.resource_id },
            feed: CollectFeed {
                according_recipe: true,
                feeds,
            },
            label_fields: LABEL_FIELDS.iter().map(|f| f.to_string()).collect(),
        };
        let header = mes_header(principal, station_id, site, request_id);

        let reply: CollectReply = self.mes.send(&url, &header, &body).await?;
        if req.print {
            warn!("Label printing requested on station {} is not supported", station_id);
        }
        collect_response(reply)
    }
}

fn feed_content(sources: &[FeedSource]) -> Result<Vec<FeedPerSite>, ApiError> {
    sources
        .iter()
        .map(|s| {
            Ok(FeedPerSite {
                site: UniqueSite {
                    station: s.site_info.station_id.clone(),
                    site_id: SiteId {
                        name: s.site_info.site_name.clone(),
                        index: s.site_info.site_index,
                    },
                },
                quantity: require_float_decimal(s.quantity)?,
            })
        })
        .collect()
}

/// `<group><first two characters of the station code>-<MMDD>`; short codes are
/// zero padded.
fn lot_number(group: i32, station_code: &str, work_date: NaiveDate) -> String {
    let code: String = format!("{:0>2}", station_code).chars().take(2).collect();
    format!("{}{}-{}", group, code, work_date.format("%m%d"))
}

fn positive_quantity(value: &str) -> Result<Decimal, ApiError> {
    parse_decimal(value)
        .filter(|q| q.is_sign_positive() && !q.is_zero())
        .ok_or_else(|| ApiError::mcom(ErrorCode::InvalidNumber, format!("invalid_number = {}", value)))
}

fn first_site_name(sites: &[UniqueSite]) -> String {
    sites.first().map(|s| s.site_id.name.clone()).unwrap_or_default()
}

fn mes_header(principal: &Principal, station_id: &str, site: String, request_id: &str) -> MesHeader {
    MesHeader {
        user_id: principal.id.clone(),
        station: station_id.to_string(),
        site,
        pid: request_id.to_string(),
    }
}

fn feed_response(reply: ResourceFeedReply) -> MesResponse {
    let mut response = MesResponse {
        enable_force: reply.enforceable,
        ..Default::default()
    };
    match reply.results {
        Some(results) if !reply.enforce_done => {
            response.error = results.iter().map(|r| MesErrorItem::from(&r.error)).collect();
        }
        _ => response.success = true,
    }
    response
}

fn collect_response(reply: CollectReply) -> Result<MesResponse, ApiError> {
    let mut response = MesResponse {
        enable_force: reply.enforceable,
        ..Default::default()
    };
    match reply.error {
        Some(err) if !err.is_none() && !reply.enforce_done => {
            if err.code == MES_ERROR_INTERNAL {
                return Err(ApiError::internal(ERR_MES_INTERNAL));
            }
            response.error = vec![MesErrorItem::from(&err)];
        }
        _ => response.success = true,
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::prelude::*;
    use serde_json::{json, Value};

    use crate::mcom::Role;
    use crate::mes::{CheckError, ResourceResult};
    use crate::models::{CollectSection, FeedResource, FeedSection, ForceFlag, SiteAddress};
    use crate::test_support::{client, USER};

    fn principal() -> Principal {
        Principal {
            id: USER.into(),
            roles: vec![Role::Operator],
        }
    }

    fn service(server: &MockServer, mes_path: &str) -> ProduceService {
        let settings = Settings {
            mes_path: mes_path.to_string(),
            ..Default::default()
        };
        ProduceService::new(client(server), MesClient::new(None).unwrap(), Arc::new(settings))
    }

    fn work_order_json() -> Value {
        json!({
            "id": "WO1",
            "product": {"id": "P1", "type": "RUBBER"},
            "process": {"oid": "PO", "name": "MIX", "type": "A"},
            "recipe_id": "RC1",
            "department_id": "D",
            "station": "S1",
            "date": "2024-03-01",
            "sequence": 2,
            "status": 1,
            "batch_quantity_details": {"batch_quantity_type": 1, "fixed_quantity": {"batch_count": 2, "plan_quantity": "10"}},
            "unit": "kg",
            "updated_at": "2024-03-05T08:00:00Z",
            "updated_by": "u1",
            "inserted_at": "2024-03-01T00:00:00Z",
            "inserted_by": "u0"
        })
    }

    fn station_config_json(split: bool, feed_source: i32) -> Value {
        json!({
            "split_feed_and_collect": split,
            "feed": {
                "product_types": [], "need_material_resource": true, "quantity_source": feed_source,
                "operator_sites": [{"station": "S1", "site_id": {"name": "FEED", "index": 0}}]
            },
            "collect": {
                "need_collect_resource": true, "need_carrier_resource": false, "quantity_source": 0,
                "default_quantity": "0",
                "operator_sites": [{"station": "S1", "site_id": {"name": "COLLECT", "index": 0}}]
            }
        })
    }

    fn feed_collect_request(carrier: &str) -> FeedCollectRequest {
        FeedCollectRequest {
            station_id: "S1".into(),
            feed: FeedSection {
                batch: 2,
                source: vec![FeedSource {
                    site_info: SiteAddress {
                        station_id: "S1".into(),
                        site_name: "A".into(),
                        site_index: 0,
                    },
                    quantity: 12.5,
                }],
            },
            collect: CollectSection {
                work_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                group: 3,
                quantity: 20.0,
                resource_id: "R-NEW".into(),
                carrier_resource: carrier.into(),
                sequence: 4,
                print: false,
            },
        }
    }

    async fn mock_station(server: &MockServer, code: &str) {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetStation").json_body(json!({"id": "S1"}));
                then.status(200).json_body(json!({
                    "id": "S1",
                    "administrative_department": "D",
                    "sites": [],
                    "state": 1,
                    "information": {"code": code, "description": ""},
                    "updated_by": "u", "updated_at": "2024-03-01T00:00:00Z",
                    "inserted_by": "u", "inserted_at": "2024-03-01T00:00:00Z"
                }));
            })
            .await;
    }

    #[test]
    fn test_lot_number() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(lot_number(3, "1", date), "301-0305");
        assert_eq!(lot_number(12, "ABC", date), "12AB-0305");
        assert_eq!(lot_number(1, "", date), "100-0305");
    }

    #[test]
    fn test_positive_quantity() {
        assert_eq!(positive_quantity("2.5").unwrap(), Decimal::new(25, 1));
        for bad in ["0", "-1", "lots"] {
            let err = positive_quantity(bad).unwrap_err();
            assert!(matches!(err, ApiError::Mcom(e) if e.code == ErrorCode::InvalidNumber && e.details == format!("invalid_number = {}", bad)));
        }
    }

    #[test]
    fn test_feed_response() {
        let failed = ResourceFeedReply {
            results: Some(vec![ResourceResult {
                error: CheckError {
                    code: "ERROR_BATCH_NOT_FOUND".into(),
                    details: "no batch".into(),
                },
            }]),
            enforceable: true,
            enforce_done: false,
        };
        assert_eq!(
            feed_response(failed.clone()),
            MesResponse {
                enable_force: true,
                success: false,
                error: vec![MesErrorItem {
                    code: ErrorCode::BatchNotFound.value(),
                    details: "no batch".into()
                }],
            }
        );

        let forced = ResourceFeedReply {
            enforce_done: true,
            ..failed
        };
        assert!(feed_response(forced).success);
        assert!(feed_response(ResourceFeedReply::default()).success);
    }

    #[test]
    fn test_collect_response() {
        assert!(collect_response(CollectReply::default()).unwrap().success);

        let internal = CollectReply {
            error: Some(CheckError {
                code: MES_ERROR_INTERNAL.into(),
                details: "boom".into(),
            }),
            ..Default::default()
        };
        let err = collect_response(internal).unwrap_err();
        assert!(matches!(err, ApiError::Internal(d) if d == ERR_MES_INTERNAL));

        let rejected = CollectReply {
            error: Some(CheckError {
                code: "ERROR_RESOURCE_EXPIRED".into(),
                details: "expired".into(),
            }),
            ..Default::default()
        };
        let response = collect_response(rejected).unwrap();
        assert!(!response.success);
        assert_eq!(response.error[0].details, "expired");
    }

    #[actix_web::test]
    async fn test_feed_collect_creates_batch_and_reloads_carrier() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetWorkOrder").json_body(json!({"id": "WO1"}));
                then.status(200).json_body(work_order_json());
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetBatch")
                    .json_body(json!({"work_order": "WO1", "number": 2}));
                then.status(400).json_body(json!({"code": 510, "details": "batch not found"}));
            })
            .await;
        let create_batch = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/CreateBatch")
                    .json_body(json!({"work_order": "WO1", "number": 2, "status": 1}));
                then.status(200);
            })
            .await;
        let feed = server
            .mock_async(|when, then| {
                when.method(POST).path("/Feed").json_body(json!({
                    "batch": {"work_order": "WO1", "number": 2},
                    "feed_content": [{"site": {"station": "S1", "site_id": {"name": "A", "index": 0}}, "quantity": "12.5"}]
                }));
                then.status(200);
            })
            .await;
        let close = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/UpdateBatch")
                    .json_body(json!({"work_order": "WO1", "number": 2, "status": 2}));
                then.status(200);
            })
            .await;
        mock_station(&server, "1").await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetCarrier").json_body(json!({"id": "C1"}));
                then.status(200).json_body(json!({
                    "id": "C1", "allowed_material": "", "contents": [],
                    "update_by": "u", "update_at": "2024-03-01T00:00:00Z"
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetLimitaryHour")
                    .json_body(json!({"product_type": "RUBBER"}));
                then.status(400).json_body(json!({"code": 700, "details": "not found"}));
            })
            .await;
        let create_resource = server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateMaterialResources").json_body_partial(
                    json!({"materials": [{
                        "type": "RUBBER", "id": "P1", "status": 2, "quantity": "20", "unit": "kg",
                        "lot_number": "301-0305", "resource_id": "R-NEW", "carrier_id": "C1"
                    }]})
                    .to_string(),
                );
                then.status(200)
                    .json_body(json!({"resources": [{"oid": "OID-1", "id": "R-NEW"}]}));
            })
            .await;
        let clear = server
            .mock_async(|when, then| {
                when.method(POST).path("/UpdateCarrier").json_body_partial(
                    json!({"id": "C1", "action": {"type": "clear_resources"}}).to_string(),
                );
                then.status(200);
            })
            .await;
        let bind = server
            .mock_async(|when, then| {
                when.method(POST).path("/UpdateCarrier").json_body_partial(
                    json!({"id": "C1", "action": {"type": "bind_resources", "resource_ids": ["R-NEW"]}})
                        .to_string(),
                );
                then.status(200);
            })
            .await;
        let record = server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateCollectRecord").json_body(json!({
                    "work_order": "WO1", "lot_number": "301-0305", "sequence": 4, "quantity": "20",
                    "station": "S1", "resource_oid": "OID-1"
                }));
                then.status(200);
            })
            .await;

        service(&server, "")
            .feed_collect(&principal(), "WO1", feed_collect_request("C1"))
            .await
            .unwrap();

        create_batch.assert_async().await;
        feed.assert_async().await;
        close.assert_async().await;
        create_resource.assert_async().await;
        clear.assert_async().await;
        bind.assert_async().await;
        record.assert_async().await;
    }

    #[actix_web::test]
    async fn test_feed_collect_rejects_closed_batch() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetWorkOrder");
                then.status(200).json_body(work_order_json());
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetBatch");
                then.status(200).json_body(json!({
                    "info": {"work_order": "WO1", "number": 2, "status": 3, "records": []}
                }));
            })
            .await;
        let feed = server
            .mock_async(|when, then| {
                when.method(POST).path("/Feed");
                then.status(200);
            })
            .await;

        let err = service(&server, "")
            .feed_collect(&principal(), "WO1", feed_collect_request(""))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Mcom(e) if e.details == "bad status: status=BATCH_CLOSED"));
        feed.assert_hits_async(0).await;
    }

    #[actix_web::test]
    async fn test_mes_feed_needs_mes_path() {
        let server = MockServer::start_async().await;
        let req = MesFeedRequest {
            work_order_id: "WO1".into(),
            batch: 1,
            close_batch: false,
            force_feed: ForceFlag::default(),
            resource: vec![],
        };
        let err = service(&server, "")
            .mes_feed(&principal(), "S1", "", req)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Internal(d) if d == ERR_NO_MES_PATH));
    }

    #[actix_web::test]
    async fn test_mes_feed_sends_quantities_from_request() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetStationConfiguration");
                then.status(200).json_body(station_config_json(true, 1));
            })
            .await;
        let mes = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/mes/api/v2/resource/feed")
                    .header("user-id", USER)
                    .header("station", "S1")
                    .header("site", "FEED")
                    .header("pid", "rid-9")
                    .json_body(json!({
                        "check": {"actionMode": "ACTION_FORCE", "workOrder": "WO1", "batch": 1},
                        "closeBatch": true,
                        "accordingRecipe": false,
                        "feeds": [{"resource": {"id": "R1"}, "quantity": {"exp": -1, "value": "25"}}]
                    }));
                then.status(200).json_body(json!({"enforceable": false, "enforceDone": false}));
            })
            .await;

        let req = MesFeedRequest {
            work_order_id: "WO1".into(),
            batch: 1,
            close_batch: true,
            force_feed: ForceFlag { force: true },
            resource: vec![FeedResource {
                id: "R1".into(),
                quantity: "2.5".into(),
            }],
        };
        let response = service(&server, &server.base_url())
            .mes_feed(&principal(), "S1", "rid-9", req)
            .await
            .unwrap();
        mes.assert_async().await;
        assert!(response.success);
    }

    #[actix_web::test]
    async fn test_mes_collect_forwards_feed_resources() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetStationConfiguration");
                then.status(200).json_body(station_config_json(false, 0));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetWorkOrder").json_body(json!({"id": "WO1"}));
                then.status(200).json_body(work_order_json());
            })
            .await;
        let mes = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/mes/api/v2/resource/collect")
                    .header("site", "")
                    .json_body(json!({
                        "actionMode": "ACTION_AUTO",
                        "workOrder": "WO1",
                        "carrier": "C1",
                        "sequence": 3,
                        "quantity": {"exp": 0, "value": "8"},
                        "resource": {"id": "R-OUT"},
                        "feed": {"accordingRecipe": true, "feeds": [{"resource": {"id": "R1"}}]},
                        "labelFields": ["manufacture_date", "expiry"]
                    }));
                then.status(200).json_body(json!({
                    "error": {"code": "ERROR_RESOURCE_EXPIRED", "details": "expired"},
                    "enforceable": true,
                    "enforceDone": false
                }));
            })
            .await;

        let req = MesCollectRequest {
            work_order_id: "WO1".into(),
            sequence: 3,
            quantity: "8".into(),
            resource_id: "R-OUT".into(),
            carrier_resource: "C1".into(),
            force_collect: ForceFlag::default(),
            feed_resource_ids: vec!["R1".into()],
            print: false,
        };
        let response = service(&server, &server.base_url())
            .mes_collect(&principal(), "S1", "", req)
            .await
            .unwrap();
        mes.assert_async().await;
        assert!(response.enable_force);
        assert!(!response.success);
        assert_eq!(response.error.len(), 1);
    }
}
