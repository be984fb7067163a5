//! Station maintenance, listing and operator sign in/out.

use std::sync::Arc;

use log::info;

use crate::constants::{ERR_READ_SITE_ON_UPDATE, ERR_WRONG_SITE_ACTION_MODE};
use crate::errors::ApiError;
use crate::mcom::{
    self, CallContext, DataManager, ErrorCode, GetStationRequest, ListStationIDsRequest,
    ListStationsRequest, Order, PaginationRequest, SiteActionMode, SiteDefinition, SiteId,
    SignInStationRequest, SignOutStationsRequest, StationInformation, StationState, UniqueSite,
    UpdateStationSite,
};
use crate::models::{
    CreateStationRequest, IdName, PaginatedData, Principal, SiteAddress, SiteRequest,
    StationData, StationIdItem, StationListItem, StationSignInRequest, StationSignOutRequest,
    StationSiteItem, UpdateStationRequest,
};

pub struct StationService {
    dm: Arc<dyn DataManager>,
}

impl SiteRequest {
    fn definition(&self) -> SiteDefinition {
        SiteDefinition {
            name: self.name.clone(),
            index: self.index,
            site_type: self.site_type,
            sub_type: self.sub_type,
        }
    }
}

impl StationService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    pub async fn list_ids(
        &self,
        principal: &Principal,
        department_oid: &str,
    ) -> Result<Vec<StationIdItem>, ApiError> {
        let reply = self
            .dm
            .list_stations(
                &CallContext::user(&principal.id),
                ListStationsRequest {
                    department_id: department_oid.to_string(),
                    pagination: None,
                    order_by: vec![],
                },
            )
            .await?;
        Ok(reply
            .stations
            .into_iter()
            .map(|s| StationIdItem { id: s.id })
            .collect())
    }

    pub async fn list_info(
        &self,
        principal: &Principal,
        department_oid: &str,
        pagination: Option<PaginationRequest>,
        order_by: Vec<Order>,
    ) -> Result<PaginatedData<StationData>, ApiError> {
        let reply = self
            .dm
            .list_stations(
                &CallContext::user(&principal.id),
                ListStationsRequest {
                    department_id: department_oid.to_string(),
                    pagination,
                    order_by,
                },
            )
            .await?;
        let items = reply.stations.into_iter().map(StationData::from).collect();
        Ok(PaginatedData::new(items, reply.amount_of_data))
    }

    /// New stations start shut down; every site must be added.
    pub async fn create(
        &self,
        principal: &Principal,
        req: CreateStationRequest,
    ) -> Result<(), ApiError> {
        let sites = req
            .sites
            .iter()
            .map(|site| {
                if site.action_mode != SiteActionMode::Add.value() {
                    return Err(ApiError::mcom(ErrorCode::BadRequest, ERR_WRONG_SITE_ACTION_MODE));
                }
                Ok(site.definition())
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.dm
            .create_station(
                &CallContext::user(&principal.id),
                mcom::CreateStationRequest {
                    id: req.id.clone(),
                    department_id: req.department_oid,
                    sites,
                    state: StationState::Shutdown,
                    information: StationInformation {
                        code: req.code,
                        description: req.description,
                    },
                },
            )
            .await?;
        info!("Station {} created by {}", req.id, principal.id);
        Ok(())
    }

    pub async fn update(
        &self,
        principal: &Principal,
        station_id: &str,
        req: UpdateStationRequest,
    ) -> Result<(), ApiError> {
        let sites = req
            .sites
            .iter()
            .map(|site| {
                let action_mode = match SiteActionMode::try_from(site.action_mode) {
                    Ok(mode @ (SiteActionMode::Add | SiteActionMode::Remove)) => mode,
                    _ => return Err(ApiError::mcom(ErrorCode::BadRequest, ERR_READ_SITE_ON_UPDATE)),
                };
                Ok(UpdateStationSite {
                    action_mode,
                    information: site.definition(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.dm
            .update_station(
                &CallContext::user(&principal.id),
                mcom::UpdateStationRequest {
                    id: station_id.to_string(),
                    sites,
                    state: req.state,
                    information: StationInformation {
                        code: req.code,
                        description: req.description,
                    },
                },
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, principal: &Principal, station_id: &str) -> Result<(), ApiError> {
        self.dm
            .delete_station(
                &CallContext::user(&principal.id),
                mcom::DeleteStationRequest {
                    station_id: station_id.to_string(),
                },
            )
            .await?;
        info!("Station {} deleted by {}", station_id, principal.id);
        Ok(())
    }

    pub async fn list_states(&self, principal: &Principal) -> Result<Vec<IdName>, ApiError> {
        let reply = self
            .dm
            .list_station_state(&CallContext::user(&principal.id))
            .await?;
        Ok(reply.states.into_iter().map(IdName::from).collect())
    }

    pub async fn list_station_ids(
        &self,
        principal: &Principal,
        department_oid: &str,
    ) -> Result<Vec<StationListItem>, ApiError> {
        let reply = self
            .dm
            .list_station_ids(
                &CallContext::user(&principal.id),
                ListStationIDsRequest {
                    department_id: department_oid.to_string(),
                },
            )
            .await?;
        Ok(reply
            .stations
            .into_iter()
            .map(|station_id| StationListItem { station_id })
            .collect())
    }

    pub async fn list_sites(
        &self,
        principal: &Principal,
        station_id: &str,
    ) -> Result<Vec<StationSiteItem>, ApiError> {
        let station = self
            .dm
            .get_station(
                &CallContext::user(&principal.id),
                GetStationRequest {
                    id: station_id.to_string(),
                },
            )
            .await?;
        Ok(station
            .sites
            .into_iter()
            .map(|site| StationSiteItem {
                site: SiteAddress {
                    station_id: site.information.station,
                    site_name: site.information.name,
                    site_index: site.information.index,
                },
                site_type: site.information.site_type.name().to_string(),
                sub_type: site.information.sub_type,
            })
            .collect())
    }

    /// Signs the principal in on index 0 of the site, replacing any other operator.
    pub async fn force_sign_in(
        &self,
        principal: &Principal,
        station_id: &str,
        req: StationSignInRequest,
    ) -> Result<(), ApiError> {
        self.dm
            .sign_in_station(
                &CallContext::user(&principal.id),
                SignInStationRequest {
                    station: station_id.to_string(),
                    site: SiteId {
                        name: req.site_name,
                        index: 0,
                    },
                    group: req.group,
                    work_date: req.work_date,
                    force: true,
                    create_site_if_not_exists: true,
                },
            )
            .await?;
        info!("User {} signed in station {}", principal.id, station_id);
        Ok(())
    }

    pub async fn sign_out(
        &self,
        principal: &Principal,
        req: StationSignOutRequest,
    ) -> Result<(), ApiError> {
        let sites = req
            .station_sites
            .into_iter()
            .map(|s| UniqueSite {
                station: s.station_id,
                site_id: SiteId {
                    name: s.site_name,
                    index: 0,
                },
            })
            .collect();
        self.dm
            .sign_out_stations(
                &CallContext::user(&principal.id),
                SignOutStationsRequest { sites },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::mcom::{Role, SiteSubType, SiteType};
    use crate::models::StationSiteName;
    use crate::test_support::{client, USER};

    fn principal() -> Principal {
        Principal {
            id: USER.into(),
            roles: vec![Role::Administrator],
        }
    }

    fn site(action_mode: i32) -> SiteRequest {
        SiteRequest {
            action_mode,
            name: "A".into(),
            index: 0,
            site_type: SiteType::Slot,
            sub_type: SiteSubType::Material,
        }
    }

    #[actix_web::test]
    async fn test_create_rejects_non_add_sites() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateStation");
                then.status(200);
            })
            .await;

        let err = StationService::new(client(&server))
            .create(
                &principal(),
                CreateStationRequest {
                    id: "S1".into(),
                    department_oid: "D".into(),
                    code: String::new(),
                    description: String::new(),
                    sites: vec![site(1), site(2)],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Mcom(e) if e.details == ERR_WRONG_SITE_ACTION_MODE));
        mock.assert_hits_async(0).await;
    }

    #[actix_web::test]
    async fn test_create_starts_shutdown() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/CreateStation").json_body(json!({
                    "id": "S1",
                    "department_id": "D",
                    "sites": [{"name": "A", "index": 0, "type": 2, "sub_type": 2}],
                    "state": 4,
                    "information": {"code": "C", "description": "desc"}
                }));
                then.status(200);
            })
            .await;

        StationService::new(client(&server))
            .create(
                &principal(),
                CreateStationRequest {
                    id: "S1".into(),
                    department_oid: "D".into(),
                    code: "C".into(),
                    description: "desc".into(),
                    sites: vec![site(1)],
                },
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_update_rejects_read_sites() {
        let server = MockServer::start_async().await;
        let err = StationService::new(client(&server))
            .update(
                &principal(),
                "S1",
                UpdateStationRequest {
                    code: String::new(),
                    description: String::new(),
                    state: StationState::Idle,
                    sites: vec![site(0)],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Mcom(e) if e.details == ERR_READ_SITE_ON_UPDATE));
    }

    #[actix_web::test]
    async fn test_list_info_pages_and_maps() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/ListStations").json_body(json!({
                    "department_id": "D",
                    "pagination": {"page": 1, "limit": 10},
                    "order_by": [{"name": "id", "descending": false}]
                }));
                then.status(200).json_body(json!({
                    "stations": [{
                        "id": "S1",
                        "administrative_department": "D",
                        "sites": [{
                            "information": {"station": "S1", "name": "A", "index": 0, "type": 1, "sub_type": 2},
                            "content": {"container": []}
                        }],
                        "state": 1,
                        "information": {"code": "C", "description": ""},
                        "updated_by": "u",
                        "updated_at": "2024-01-02T00:00:00Z",
                        "inserted_by": "u",
                        "inserted_at": "2024-01-01T00:00:00Z"
                    }],
                    "amount_of_data": 21
                }));
            })
            .await;

        let page = StationService::new(client(&server))
            .list_info(
                &principal(),
                "D",
                PaginationRequest::from_query(Some(1), Some(10)),
                vec![Order::asc("id")],
            )
            .await
            .unwrap();
        mock.assert_async().await;

        let body = serde_json::to_value(page).unwrap();
        assert_eq!(body["total"], 21);
        assert_eq!(body["items"][0]["ID"], "S1");
        assert_eq!(body["items"][0]["state"], 1);
        assert_eq!(
            body["items"][0]["sites"][0],
            json!({"content": {}, "index": 0, "name": "A", "subType": 2, "type": 1})
        );
    }

    #[actix_web::test]
    async fn test_list_sites_names_the_type() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/GetStation").json_body(json!({"id": "S1"}));
                then.status(200).json_body(json!({
                    "id": "S1",
                    "administrative_department": "D",
                    "sites": [{
                        "information": {"station": "S1", "name": "OP", "index": 0, "type": 2, "sub_type": 1}
                    }],
                    "state": 1,
                    "information": {"code": "", "description": ""},
                    "updated_by": "u",
                    "updated_at": "2024-01-02T00:00:00Z",
                    "inserted_by": "u",
                    "inserted_at": "2024-01-01T00:00:00Z"
                }));
            })
            .await;

        let sites = StationService::new(client(&server))
            .list_sites(&principal(), "S1")
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(sites).unwrap(),
            json!([{
                "site": {"stationID": "S1", "siteName": "OP", "siteIndex": 0},
                "type": "SLOT",
                "subType": 1
            }])
        );
    }

    #[actix_web::test]
    async fn test_force_sign_in_uses_index_zero() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/SignInStation").json_body(json!({
                    "station": "S1",
                    "site": {"name": "OP", "index": 0},
                    "group": 1,
                    "work_date": "2024-03-01",
                    "force": true,
                    "create_site_if_not_exists": true
                }));
                then.status(200);
            })
            .await;

        StationService::new(client(&server))
            .force_sign_in(
                &principal(),
                "S1",
                StationSignInRequest {
                    site_name: "OP".into(),
                    group: 1,
                    work_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                },
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_sign_out_sites() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/SignOutStations").json_body(json!({
                    "sites": [{"station": "S1", "site_id": {"name": "OP", "index": 0}}]
                }));
                then.status(200);
            })
            .await;

        StationService::new(client(&server))
            .sign_out(
                &principal(),
                StationSignOutRequest {
                    station_sites: vec![StationSiteName {
                        station_id: "S1".into(),
                        site_name: "OP".into(),
                    }],
                },
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
