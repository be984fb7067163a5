//! Site queries and resource binding.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};

use crate::config::Settings;
use crate::constants::{
    ERR_MATERIAL_NOT_AVAILABLE, ERR_MATERIAL_NOT_IN_RECIPE, ERR_MISSING_BIND_RESOURCE,
    ERR_TOOL_NOT_IN_RECIPE,
};
use crate::errors::ApiError;
use crate::mcom::{
    BindMaterialResource, BindOption, CallContext, DataManager, ErrorCode, GetMaterialResourceIdentityRequest,
    GetProcessDefinitionRequest, GetSiteReply, GetSiteRequest, GetToolResourceRequest, GetWorkOrderRequest,
    ListMaterialResourceIdentitiesRequest, ListSiteMaterialsRequest, Material, MaterialBindRequestDetail,
    MaterialResourceBindRequestV2, MaterialStatus, McomError, RecipeProcessConfig, SiteAttributes, SiteId,
    SiteSubType, SiteType, ToolBindRequestDetail, ToolResource, ToolResourceBindRequestV2, UniqueSite,
};
use crate::mes::{self, MesClient, NotifyBindResource, SiteBindingState, SiteResource};
use crate::models::{
    AutoBindRequest, BindMaterialData, BindResourceItem, IdName, Principal, SiteAddress,
    SiteInformationData, StationOperatorData, RESOURCE_TYPE_MATERIAL, RESOURCE_TYPE_TOOL,
};
use crate::services::site_state::material_binding_state;
use crate::utils::decimal::parse_decimal;

pub struct SiteService {
    dm: Arc<dyn DataManager>,
    mes: MesClient,
    settings: Arc<Settings>,
}

impl SiteService {
    pub fn new(dm: Arc<dyn DataManager>, mes: MesClient, settings: Arc<Settings>) -> Self {
        Self { dm, mes, settings }
    }

    pub async fn list_materials(
        &self,
        principal: &Principal,
        station: &str,
        site_name: &str,
        site_index: i16,
    ) -> Result<Vec<BindMaterialData>, ApiError> {
        let reply = self
            .dm
            .list_site_materials(
                &CallContext::user(&principal.id),
                ListSiteMaterialsRequest {
                    station: station.to_string(),
                    site: SiteId {
                        name: site_name.to_string(),
                        index: site_index,
                    },
                },
            )
            .await?;
        Ok(reply.materials.into_iter().map(BindMaterialData::from).collect())
    }

    pub async fn list_types(&self, principal: &Principal) -> Result<Vec<IdName>, ApiError> {
        let reply = self.dm.list_site_type(&CallContext::user(&principal.id)).await?;
        Ok(reply.types.into_iter().map(IdName::from).collect())
    }

    pub async fn list_sub_types(&self, principal: &Principal) -> Result<Vec<IdName>, ApiError> {
        let reply = self
            .dm
            .list_site_sub_type(&CallContext::user(&principal.id))
            .await?;
        Ok(reply.types.into_iter().map(IdName::from).collect())
    }

    pub async fn information(
        &self,
        principal: &Principal,
        site: SiteAddress,
    ) -> Result<SiteInformationData, ApiError> {
        let reply = self.get_site(&CallContext::user(&principal.id), &site).await?;
        Ok(SiteInformationData {
            site_type: reply.attributes.site_type.name().to_string(),
            sub_type: reply.attributes.sub_type.value(),
        })
    }

    /// Current operator of an operator slot. A site that does not exist yet has
    /// no operator.
    pub async fn operator(
        &self,
        principal: &Principal,
        site: SiteAddress,
    ) -> Result<StationOperatorData, ApiError> {
        let reply = match self.get_site(&CallContext::user(&principal.id), &site).await {
            Ok(reply) => reply,
            Err(e) if e.is(ErrorCode::StationSiteNotFound) => {
                return Ok(StationOperatorData {
                    operator_id: String::new(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let attributes = &reply.attributes;
        if attributes.sub_type != SiteSubType::Operator || attributes.site_type != SiteType::Slot {
            return Err(McomError::code(ErrorCode::StationSiteSubTypeMismatch).into());
        }
        let operator_id = reply
            .content
            .slot
            .and_then(|slot| slot.operator)
            .map(|o| o.employee_id)
            .unwrap_or_default();
        Ok(StationOperatorData { operator_id })
    }

    async fn get_site(
        &self,
        ctx: &CallContext,
        site: &SiteAddress,
    ) -> crate::mcom::McomResult<GetSiteReply> {
        self.dm
            .get_site(
                ctx,
                GetSiteRequest {
                    station_id: site.station_id.clone(),
                    site_name: site.site_name.clone(),
                    site_index: site.site_index,
                },
            )
            .await
    }

    /// Binds the requested resources to a site, or clears it.
    ///
    /// With a work order and without force, every bound resource must belong to
    /// the recipe config of the station.
    pub async fn auto_bind(&self, principal: &Principal, req: AutoBindRequest) -> Result<(), ApiError> {
        let ctx = CallContext::user(&principal.id);
        let site = self
            .get_site(
                &ctx,
                &SiteAddress {
                    station_id: req.station.clone(),
                    site_name: req.site_name.clone(),
                    site_index: req.site_index,
                },
            )
            .await?;

        let recipe_config = if !req.work_order_id.is_empty() && !req.bind_type.is_clear() {
            self.recipe_config(&ctx, &req.work_order_id, &req.station).await?
        } else {
            RecipeProcessConfig::default()
        };

        match req.resource_type {
            RESOURCE_TYPE_MATERIAL => self.bind_materials(&ctx, &req, &site, &recipe_config).await,
            RESOURCE_TYPE_TOOL => self.bind_tool(&ctx, &req, &recipe_config).await,
            other => {
                warn!("Ignoring bind of unknown resource type {}", other);
                Ok(())
            }
        }
    }

    /// Recipe config of the work order for the station; empty when no config
    /// serves it.
    async fn recipe_config(
        &self,
        ctx: &CallContext,
        work_order_id: &str,
        station: &str,
    ) -> Result<RecipeProcessConfig, ApiError> {
        let work_order = self
            .dm
            .get_work_order(
                ctx,
                GetWorkOrderRequest {
                    id: work_order_id.to_string(),
                },
            )
            .await?;
        let process = self
            .dm
            .get_process_definition(
                ctx,
                GetProcessDefinitionRequest {
                    recipe_id: work_order.recipe_id,
                    process_name: work_order.process.name,
                    process_type: work_order.process.process_type,
                },
            )
            .await?;
        Ok(process.last_config_for(station).cloned().unwrap_or_default())
    }

    async fn bind_materials(
        &self,
        ctx: &CallContext,
        req: &AutoBindRequest,
        site: &GetSiteReply,
        recipe_config: &RecipeProcessConfig,
    ) -> Result<(), ApiError> {
        let force = req.is_forced();
        let option = match &req.queue_option {
            Some(q) if q.head => BindOption {
                head: true,
                ..Default::default()
            },
            Some(q) if q.tail => BindOption {
                tail: true,
                ..Default::default()
            },
            Some(q) => BindOption {
                index: Some(q.index),
                ..Default::default()
            },
            None => BindOption::default(),
        };

        let resources = if req.bind_type.is_clear() {
            Vec::new()
        } else {
            let resources = self
                .validate_materials(ctx, &site.attributes, &req.resources, force)
                .await?;
            if !req.work_order_id.is_empty() && !force {
                let in_recipe = |id: &str| {
                    recipe_config
                        .steps
                        .iter()
                        .flat_map(|s| s.materials.iter())
                        .any(|m| m.name == id)
                };
                if resources.iter().any(|r| !in_recipe(&r.material.id)) {
                    return Err(ApiError::mcom(
                        ErrorCode::ResourceWorkorderResourceUnexpected,
                        ERR_MATERIAL_NOT_IN_RECIPE,
                    ));
                }
            }
            resources
        };

        let bound_ids: Vec<SiteResource> = resources
            .iter()
            .map(|r| SiteResource::new(&r.resource_id))
            .collect();
        self.dm
            .material_resource_bind_v2(
                ctx,
                MaterialResourceBindRequestV2 {
                    details: vec![MaterialBindRequestDetail {
                        site: unique_site(req),
                        bind_type: req.bind_type,
                        resources,
                        option,
                    }],
                },
            )
            .await?;
        info!(
            "Site {}/{}#{} bound with {} by {}",
            req.station,
            req.site_name,
            req.site_index,
            req.bind_type,
            ctx.user_id
        );

        if let Some(url) = self.settings.bind_resource_url(&req.station) {
            let current_state = if req.bind_type.is_clear() {
                SiteBindingState {
                    resources: Vec::new(),
                    not_ok: true,
                }
            } else {
                let existing = material_binding_state(
                    site.attributes.site_type,
                    site.attributes.sub_type,
                    &site.content,
                    &recipe_config.steps,
                );
                SiteBindingState {
                    resources: bound_ids.into_iter().chain(existing.resources).collect(),
                    not_ok: existing.not_ok,
                }
            };
            let body = NotifyBindResource {
                bind_type: req.bind_type.value(),
                site: mes::Site {
                    station: req.station.clone(),
                    name: req.site_name.clone(),
                    index: req.site_index,
                },
                current_state,
            };
            self.mes.notify_detached(url, body);
        }
        Ok(())
    }

    /// Looks up every requested resource and checks it may be bound to the site.
    async fn validate_materials(
        &self,
        ctx: &CallContext,
        attributes: &SiteAttributes,
        requested: &[BindResourceItem],
        force: bool,
    ) -> Result<Vec<BindMaterialResource>, ApiError> {
        let reply = self
            .dm
            .list_material_resource_identities(
                ctx,
                ListMaterialResourceIdentitiesRequest {
                    details: requested
                        .iter()
                        .map(|r| GetMaterialResourceIdentityRequest {
                            resource_id: r.resource_id.clone(),
                            product_type: r.product_type.clone(),
                        })
                        .collect(),
                },
            )
            .await?;

        let now = Utc::now();
        let mut bound = Vec::with_capacity(requested.len());
        for (index, (wanted, found)) in requested.iter().zip(reply.replies).enumerate() {
            let quantity = if wanted.quantity.is_empty() {
                None
            } else {
                Some(parse_decimal(&wanted.quantity).ok_or_else(|| {
                    ApiError::mcom(
                        ErrorCode::InvalidNumber,
                        format!("invalid_number={}", wanted.quantity),
                    )
                })?)
            };

            let Some(found) = found else {
                if !force {
                    return Err(ApiError::mcom(ErrorCode::ResourceNotFound, wanted.resource_id.clone()));
                }
                bound.push(BindMaterialResource::id_only(&wanted.resource_id));
                continue;
            };

            let stock = found.material.quantity;
            if let Some(demand) = quantity {
                if stock < demand || stock.is_sign_negative() || stock.is_zero() {
                    return Err(ApiError::mcom(
                        ErrorCode::ResourceMaterialShortage,
                        format!(
                            "not enough resource quantity to bind, index={}, storage={}, demand={}",
                            index, stock, wanted.quantity
                        ),
                    ));
                }
            }
            if found.material.expiry_time < now {
                return Err(ApiError::mcom(
                    ErrorCode::ResourceExpired,
                    format!("resource expired, index={}", index),
                ));
            }
            if found.material.status != MaterialStatus::Available {
                return Err(ApiError::mcom(ErrorCode::ResourceUnavailable, ERR_MATERIAL_NOT_AVAILABLE));
            }
            attributes.limit_handler(&found.material.id)?;

            bound.push(BindMaterialResource {
                material: Material {
                    id: found.material.id,
                    grade: found.material.grade,
                },
                quantity,
                resource_id: found.material.resource_id,
                product_type: found.material.product_type,
                warehouse: found.warehouse,
                status: Some(found.material.status),
                expiry_time: Some(found.material.expiry_time),
            });
        }
        Ok(bound)
    }

    async fn bind_tool(
        &self,
        ctx: &CallContext,
        req: &AutoBindRequest,
        recipe_config: &RecipeProcessConfig,
    ) -> Result<(), ApiError> {
        let resource = if req.bind_type.is_clear() {
            ToolResource::default()
        } else {
            let resource_id = req
                .resources
                .first()
                .map(|r| r.resource_id.clone())
                .ok_or_else(|| ApiError::mcom(ErrorCode::InsufficientRequest, ERR_MISSING_BIND_RESOURCE))?;
            let force = req.is_forced();
            match self
                .dm
                .get_tool_resource(
                    ctx,
                    GetToolResourceRequest {
                        resource_id: resource_id.clone(),
                    },
                )
                .await
            {
                Ok(tool) => {
                    if !req.work_order_id.is_empty()
                        && !force
                        && !recipe_config.tools.iter().any(|t| t.id == tool.tool_id)
                    {
                        return Err(ApiError::mcom(
                            ErrorCode::ResourceWorkorderResourceUnexpected,
                            ERR_TOOL_NOT_IN_RECIPE,
                        ));
                    }
                    ToolResource {
                        resource_id,
                        tool_id: tool.tool_id,
                    }
                }
                Err(e) if force && e.is(ErrorCode::ResourceNotFound) => ToolResource {
                    resource_id,
                    tool_id: String::new(),
                },
                Err(e) => return Err(e.into()),
            }
        };

        self.dm
            .tool_resource_bind_v2(
                ctx,
                ToolResourceBindRequestV2 {
                    details: vec![ToolBindRequestDetail {
                        site: unique_site(req),
                        bind_type: req.bind_type,
                        resource,
                    }],
                },
            )
            .await?;
        Ok(())
    }
}

fn unique_site(req: &AutoBindRequest) -> UniqueSite {
    UniqueSite {
        station: req.station.clone(),
        site_id: SiteId {
            name: req.site_name.clone(),
            index: req.site_index,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::Duration;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    use crate::config::StationFunctionConfig;
    use crate::mcom::{BindType, Role};
    use crate::models::{ForceOption, QueueOption};
    use crate::test_support::{client, wait_for_hits, USER};

    fn principal() -> Principal {
        Principal {
            id: USER.into(),
            roles: vec![Role::Operator],
        }
    }

    fn service(server: &MockServer, bind_url: Option<String>) -> SiteService {
        let mut settings = Settings::default();
        if let Some(url) = bind_url {
            settings.station_function_config = HashMap::from([(
                "S1".to_string(),
                StationFunctionConfig {
                    bind_resource: url,
                    ..Default::default()
                },
            )]);
        }
        SiteService::new(client(server), MesClient::new(None).unwrap(), Arc::new(settings))
    }

    fn bind_request(bind_type: BindType, resources: Vec<BindResourceItem>) -> AutoBindRequest {
        AutoBindRequest {
            station: "S1".into(),
            site_name: "A".into(),
            site_index: 0,
            bind_type,
            resource_type: RESOURCE_TYPE_MATERIAL,
            work_order_id: String::new(),
            force_bind: None,
            queue_option: None,
            resources,
        }
    }

    fn item(resource_id: &str, quantity: &str) -> BindResourceItem {
        BindResourceItem {
            resource_id: resource_id.into(),
            product_type: "RUBBER".into(),
            quantity: quantity.into(),
        }
    }

    fn identity(quantity: &str, status: i32, expires_in_hours: i64) -> Value {
        let expiry = Utc::now() + Duration::hours(expires_in_hours);
        json!({
            "material": {
                "oid": "O1", "id": "M1", "grade": "A", "resource_id": "R1", "type": "RUBBER",
                "status": status, "quantity": quantity, "unit": "kg", "lot_number": "",
                "carrier_id": "", "min_dosage": "0", "inspections": [], "remark": "",
                "production_time": "2024-01-01T00:00:00Z", "expiry_time": expiry,
                "created_at": "2024-01-01T00:00:00Z", "created_by": "u",
                "updated_at": "2024-01-01T00:00:00Z", "updated_by": "u"
            },
            "warehouse": {"id": "W1", "location": "L1"}
        })
    }

    async fn mock_site(server: &MockServer, content: Value) {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetSite");
                then.status(200).json_body(json!({
                    "attributes": {"type": 4, "sub_type": 2, "limitation": []},
                    "content": content
                }));
            })
            .await;
    }

    async fn mock_identities(server: &MockServer, replies: Value) {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ListMaterialResourceIdentities");
                then.status(200).json_body(json!({"replies": replies}));
            })
            .await;
    }

    async fn bind_err(svc: &SiteService, req: AutoBindRequest) -> McomError {
        match svc.auto_bind(&principal(), req).await {
            Err(ApiError::Mcom(e)) => e,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_bind_rejects_shortage() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        mock_identities(&server, json!([identity("5", 2, 5)])).await;

        let err = bind_err(
            &service(&server, None),
            bind_request(BindType::QueuePush, vec![item("R1", "10")]),
        )
        .await;
        assert_eq!(err.code, ErrorCode::ResourceMaterialShortage);
        assert_eq!(
            err.details,
            "not enough resource quantity to bind, index=0, storage=5, demand=10"
        );
    }

    #[actix_web::test]
    async fn test_bind_rejects_invalid_quantity_and_expired() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        mock_identities(&server, json!([identity("5", 2, -1)])).await;
        let svc = service(&server, None);

        let err = bind_err(&svc, bind_request(BindType::QueuePush, vec![item("R1", "abc")])).await;
        assert_eq!(err.code, ErrorCode::InvalidNumber);
        assert_eq!(err.details, "invalid_number=abc");

        let err = bind_err(&svc, bind_request(BindType::QueuePush, vec![item("R1", "")])).await;
        assert_eq!(err.code, ErrorCode::ResourceExpired);
        assert_eq!(err.details, "resource expired, index=0");
    }

    #[actix_web::test]
    async fn test_bind_rejects_unavailable() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        mock_identities(&server, json!([identity("5", 3, 5)])).await;

        let err = bind_err(
            &service(&server, None),
            bind_request(BindType::QueuePush, vec![item("R1", "")]),
        )
        .await;
        assert_eq!(err.code, ErrorCode::ResourceUnavailable);
        assert_eq!(err.details, ERR_MATERIAL_NOT_AVAILABLE);
    }

    #[actix_web::test]
    async fn test_missing_resource_needs_force() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        mock_identities(&server, json!([null])).await;
        let bind = server
            .mock_async(|when, then| {
                when.method(POST).path("/MaterialResourceBindV2").json_body(json!({
                    "details": [{
                        "site": {"station": "S1", "site_id": {"name": "A", "index": 0}},
                        "type": 2102,
                        "resources": [{
                            "material": {"id": "", "grade": ""},
                            "quantity": null,
                            "resource_id": "R9",
                            "product_type": "",
                            "warehouse": {"id": "", "location": ""},
                            "status": null,
                            "expiry_time": null
                        }],
                        "option": {"head": false, "tail": false, "index": null}
                    }]
                }));
                then.status(200);
            })
            .await;
        let svc = service(&server, None);

        let err = bind_err(&svc, bind_request(BindType::QueuePush, vec![item("R9", "")])).await;
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
        assert_eq!(err.details, "R9");

        let mut req = bind_request(BindType::QueuePush, vec![item("R9", "")]);
        req.force_bind = Some(ForceOption { force: true });
        svc.auto_bind(&principal(), req).await.unwrap();
        bind.assert_async().await;
    }

    /// Work order WO1 of station S1 whose process definition has `configs`.
    async fn mock_work_order_recipe(server: &MockServer, configs: Value) {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetWorkOrder").json_body(json!({"id": "WO1"}));
                then.status(200).json_body(json!({
                    "id": "WO1",
                    "product": {"id": "P1", "type": "RUBBER"},
                    "process": {"oid": "PO", "name": "MIX", "type": "A"},
                    "recipe_id": "RC1",
                    "department_id": "D",
                    "station": "S1",
                    "date": "2024-03-01",
                    "sequence": 1,
                    "status": 1,
                    "batch_quantity_details": {"batch_quantity_type": 1, "fixed_quantity": {"batch_count": 1, "plan_quantity": "10"}},
                    "updated_at": "2024-03-01T00:00:00Z",
                    "updated_by": "u",
                    "inserted_at": "2024-03-01T00:00:00Z",
                    "inserted_by": "u"
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetProcessDefinition").json_body(json!({
                    "recipe_id": "RC1", "process_name": "MIX", "process_type": "A"
                }));
                then.status(200).json_body(json!({
                    "oid": "PO", "name": "MIX", "type": "A",
                    "output": {"id": "P1", "type": "RUBBER"},
                    "configs": configs
                }));
            })
            .await;
    }

    fn material_config(stations: &[&str], material: &str) -> Value {
        json!({
            "stations": stations,
            "batch_size": "10",
            "steps": [{"materials": [{"name": material, "value": {"max": null, "mid": "1", "min": null}}]}]
        })
    }

    #[actix_web::test]
    async fn test_bind_checks_recipe_of_work_order() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        mock_identities(&server, json!([identity("5", 2, 5)])).await;
        mock_work_order_recipe(&server, json!([material_config(&["S1"], "OTHER")])).await;

        let mut req = bind_request(BindType::QueuePush, vec![item("R1", "")]);
        req.work_order_id = "WO1".into();
        let err = bind_err(&service(&server, None), req).await;
        assert_eq!(err.code, ErrorCode::ResourceWorkorderResourceUnexpected);
        assert_eq!(err.details, ERR_MATERIAL_NOT_IN_RECIPE);
    }

    #[actix_web::test]
    async fn test_bind_uses_last_config_of_station() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        mock_identities(&server, json!([identity("5", 2, 5)])).await;
        mock_work_order_recipe(
            &server,
            json!([
                material_config(&["S1"], "OTHER"),
                material_config(&["S2"], "OTHER"),
                material_config(&["S0", "S1"], "M1")
            ]),
        )
        .await;
        let bind = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/MaterialResourceBindV2")
                    .json_body_partial(r#"{"details": [{"resources": [{"resource_id": "R1"}]}]}"#);
                then.status(200);
            })
            .await;

        let mut req = bind_request(BindType::QueuePush, vec![item("R1", "")]);
        req.work_order_id = "WO1".into();
        service(&server, None).auto_bind(&principal(), req).await.unwrap();
        bind.assert_async().await;
    }

    #[actix_web::test]
    async fn test_bind_rejects_product_outside_site_limitation() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetSite");
                then.status(200).json_body(json!({
                    "attributes": {"type": 4, "sub_type": 2, "limitation": ["P9"]},
                    "content": {}
                }));
            })
            .await;
        mock_identities(&server, json!([identity("5", 2, 5)])).await;
        let bind = server
            .mock_async(|when, then| {
                when.method(POST).path("/MaterialResourceBindV2");
                then.status(200);
            })
            .await;

        let err = bind_err(
            &service(&server, None),
            bind_request(BindType::QueuePush, vec![item("R1", "")]),
        )
        .await;
        assert_eq!(err.code, ErrorCode::ResourceSiteLimitation);
        assert_eq!(err.details, "product M1 is not allowed on this site");
        bind.assert_hits_async(0).await;
    }

    #[actix_web::test]
    async fn test_queue_option_selects_bind_position() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        let cases = [
            (QueueOption { head: true, tail: true, index: 4 }, json!({"head": true, "tail": false, "index": null})),
            (QueueOption { head: false, tail: true, index: 4 }, json!({"head": false, "tail": true, "index": null})),
            (QueueOption { head: false, tail: false, index: 4 }, json!({"head": false, "tail": false, "index": 4})),
        ];
        let svc = service(&server, None);

        for (option, expected) in cases {
            let bind = server
                .mock_async(|when, then| {
                    when.method(POST)
                        .path("/MaterialResourceBindV2")
                        .json_body_partial(json!({"details": [{"option": expected}]}).to_string());
                    then.status(200);
                })
                .await;
            let mut req = bind_request(BindType::QueueClear, vec![]);
            req.queue_option = Some(option);
            svc.auto_bind(&principal(), req).await.unwrap();
            bind.assert_async().await;
            bind.delete_async().await;
        }
    }

    #[actix_web::test]
    async fn test_clear_notifies_agent_with_empty_state() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        let bind = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/MaterialResourceBindV2")
                    .json_body_partial(r#"{"details": [{"type": 2110, "resources": []}]}"#);
                then.status(200);
            })
            .await;
        let agent = server
            .mock_async(|when, then| {
                when.method(POST).path("/agent/bind").json_body(json!({
                    "bindType": 2110,
                    "site": {"station": "S1", "name": "A", "index": 0},
                    "currentState": {"resources": [], "notOK": true}
                }));
                then.status(200);
            })
            .await;

        service(&server, Some(server.url("/agent/bind")))
            .auto_bind(&principal(), bind_request(BindType::QueueClear, vec![]))
            .await
            .unwrap();
        bind.assert_async().await;
        wait_for_hits(&agent, 1).await;
    }

    #[actix_web::test]
    async fn test_bind_notifies_bound_and_existing_resources() {
        let server = MockServer::start_async().await;
        let existing = identity("5", 2, 5)["material"].clone();
        mock_site(
            &server,
            json!({"queue": [{"material": {
                "material": {"id": "M2", "grade": "B"},
                "quantity": "1",
                "resource_id": "R0",
                "product_type": "RUBBER",
                "status": 2,
                "expiry_time": existing["expiry_time"]
            }}]}),
        )
        .await;
        mock_identities(&server, json!([identity("5", 2, 5)])).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/MaterialResourceBindV2");
                then.status(200);
            })
            .await;
        let agent = server
            .mock_async(|when, then| {
                when.method(POST).path("/agent/bind").json_body(json!({
                    "bindType": 2102,
                    "site": {"station": "S1", "name": "A", "index": 0},
                    "currentState": {"resources": [{"ID": "R1"}, {"ID": "R0"}], "notOK": true}
                }));
                then.status(500);
            })
            .await;

        service(&server, Some(server.url("/agent/bind")))
            .auto_bind(&principal(), bind_request(BindType::QueuePush, vec![item("R1", "2")]))
            .await
            .unwrap();
        wait_for_hits(&agent, 1).await;
    }

    #[actix_web::test]
    async fn test_tool_bind_forced_when_missing() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetToolResource");
                then.status(400).json_body(json!({"code": 300, "details": "T1"}));
            })
            .await;
        let bind = server
            .mock_async(|when, then| {
                when.method(POST).path("/ToolResourceBindV2").json_body(json!({
                    "details": [{
                        "site": {"station": "S1", "site_id": {"name": "A", "index": 0}},
                        "type": 1101,
                        "resource": {"resource_id": "T1", "tool_id": ""}
                    }]
                }));
                then.status(200);
            })
            .await;
        let svc = service(&server, None);

        let mut req = bind_request(BindType::SlotBind, vec![item("T1", "")]);
        req.resource_type = RESOURCE_TYPE_TOOL;
        let err = bind_err(&svc, req).await;
        assert_eq!(err.code, ErrorCode::ResourceNotFound);

        let mut req = bind_request(BindType::SlotBind, vec![item("T1", "")]);
        req.resource_type = RESOURCE_TYPE_TOOL;
        req.force_bind = Some(ForceOption { force: true });
        svc.auto_bind(&principal(), req).await.unwrap();
        bind.assert_async().await;
    }

    #[actix_web::test]
    async fn test_bind_does_not_wait_for_slow_agent() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        let bind = server
            .mock_async(|when, then| {
                when.method(POST).path("/MaterialResourceBindV2");
                then.status(200);
            })
            .await;
        let agent = server
            .mock_async(|when, then| {
                when.method(POST).path("/agent/bind");
                then.status(200).delay(std::time::Duration::from_secs(2));
            })
            .await;
        let svc = service(&server, Some(server.url("/agent/bind")));

        let bound = actix_web::rt::time::timeout(
            std::time::Duration::from_millis(500),
            svc.auto_bind(&principal(), bind_request(BindType::QueueClear, vec![])),
        )
        .await
        .expect("bind waited on the agent");
        bound.unwrap();
        bind.assert_async().await;
        wait_for_hits(&agent, 1).await;
    }

    #[actix_web::test]
    async fn test_tool_bind_checks_recipe_tools() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;
        mock_work_order_recipe(
            &server,
            json!([{"stations": ["S1"], "tools": [{"id": "TL1", "required": true}], "steps": []}]),
        )
        .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/GetToolResource")
                    .json_body(json!({"resource_id": "T1"}));
                then.status(200).json_body(json!({"tool_id": "TL9"}));
            })
            .await;
        let bind = server
            .mock_async(|when, then| {
                when.method(POST).path("/ToolResourceBindV2").json_body(json!({
                    "details": [{
                        "site": {"station": "S1", "site_id": {"name": "A", "index": 0}},
                        "type": 1101,
                        "resource": {"resource_id": "T1", "tool_id": "TL9"}
                    }]
                }));
                then.status(200);
            })
            .await;
        let svc = service(&server, None);
        let tool_request = |force: bool| {
            let mut req = bind_request(BindType::SlotBind, vec![item("T1", "")]);
            req.resource_type = RESOURCE_TYPE_TOOL;
            req.work_order_id = "WO1".into();
            req.force_bind = Some(ForceOption { force });
            req
        };

        let err = bind_err(&svc, tool_request(false)).await;
        assert_eq!(err.code, ErrorCode::ResourceWorkorderResourceUnexpected);
        assert_eq!(err.details, ERR_TOOL_NOT_IN_RECIPE);
        bind.assert_hits_async(0).await;

        svc.auto_bind(&principal(), tool_request(true)).await.unwrap();
        bind.assert_async().await;
    }

    #[actix_web::test]
    async fn test_operator_of_missing_site_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetSite");
                then.status(400).json_body(json!({"code": 401, "details": ""}));
            })
            .await;

        let data = service(&server, None)
            .operator(
                &principal(),
                SiteAddress {
                    station_id: "S1".into(),
                    site_name: "OP".into(),
                    site_index: 0,
                },
            )
            .await
            .unwrap();
        assert_eq!(data.operator_id, "");
    }

    #[actix_web::test]
    async fn test_operator_requires_operator_slot() {
        let server = MockServer::start_async().await;
        mock_site(&server, json!({})).await;

        let err = service(&server, None)
            .operator(
                &principal(),
                SiteAddress {
                    station_id: "S1".into(),
                    site_name: "A".into(),
                    site_index: 0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Mcom(e) if e.code == ErrorCode::StationSiteSubTypeMismatch));
    }
}
