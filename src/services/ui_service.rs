//! Station feed/collect configuration and product groups.

use std::sync::Arc;

use log::info;
use rust_decimal::Decimal;

use crate::constants::{ERR_COLLECT_QUANTITY_TYPE, ERR_OPERATOR_SITE_EMPTY};
use crate::errors::ApiError;
use crate::mcom::{
    CallContext, CollectConfiguration, CollectQuantitySource, DataManager, ErrorCode,
    FeedConfiguration, FeedQuantitySource, GetStationConfigurationRequest, ListProductGroupsRequest,
    SetStationConfigurationRequest, SiteId, StationConfiguration, UniqueSite,
};
use crate::models::{
    CollectConfigData, CollectQuantityData, FeedConfigData, Principal, ProductGroupData, SiteAddress,
    StationConfigData, StationConfigReply,
};
use crate::validators::require_decimal;

pub struct UiService {
    dm: Arc<dyn DataManager>,
}

impl UiService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    pub async fn product_groups(
        &self,
        principal: &Principal,
        department_oid: &str,
        product_type: &str,
    ) -> Result<Vec<ProductGroupData>, ApiError> {
        let reply = self
            .dm
            .list_product_groups(
                &CallContext::user(&principal.id),
                ListProductGroupsRequest {
                    department_id: department_oid.to_string(),
                    product_type: product_type.to_string(),
                },
            )
            .await?;
        Ok(reply.products.into_iter().map(ProductGroupData::from).collect())
    }

    pub async fn set_station_config(
        &self,
        principal: &Principal,
        station_id: &str,
        config: StationConfigData,
    ) -> Result<(), ApiError> {
        let configuration = station_configuration(config)?;
        self.dm
            .set_station_configuration(
                &CallContext::user(&principal.id),
                SetStationConfigurationRequest {
                    station_id: station_id.to_string(),
                    configuration,
                },
            )
            .await?;
        info!("Configuration of station {} set by {}", station_id, principal.id);
        Ok(())
    }

    pub async fn station_config(&self, principal: &Principal, station_id: &str) -> Result<StationConfigReply, ApiError> {
        let config = self
            .dm
            .get_station_configuration(
                &CallContext::user(&principal.id),
                GetStationConfigurationRequest {
                    station_id: station_id.to_string(),
                },
            )
            .await?;
        Ok(StationConfigReply {
            station_config: station_config_data(&config),
        })
    }
}

fn station_configuration(config: StationConfigData) -> Result<StationConfiguration, ApiError> {
    let quantity = &config.collect.quantity;
    let (quantity_source, default_quantity) = match quantity.quantity_type {
        0 => (CollectQuantitySource::FromStationConfigs, require_decimal(&quantity.value)?),
        1 => (CollectQuantitySource::FromStationParams, Decimal::ZERO),
        _ => return Err(ApiError::mcom(ErrorCode::InvalidNumber, ERR_COLLECT_QUANTITY_TYPE)),
    };

    let mut feed = FeedConfiguration {
        product_types: config.feed.product_type,
        need_material_resource: config.feed.material_resource,
        quantity_source: FeedQuantitySource::FromRecipe,
        operator_sites: vec![],
    };
    let mut collect = CollectConfiguration {
        need_collect_resource: config.collect.resource,
        need_carrier_resource: config.collect.carrier_resource,
        quantity_source,
        default_quantity,
        operator_sites: vec![],
    };

    if config.separate_mode {
        if config.feed.operator_sites.is_empty() || config.collect.operator_sites.is_empty() {
            return Err(ApiError::mcom(ErrorCode::InsufficientRequest, ERR_OPERATOR_SITE_EMPTY));
        }
        feed.quantity_source = config.feed.standard_quantity;
        feed.operator_sites = operator_sites(&config.feed.operator_sites);
        collect.operator_sites = operator_sites(&config.collect.operator_sites);
    }

    Ok(StationConfiguration {
        split_feed_and_collect: config.separate_mode,
        feed,
        collect,
    })
}

/// Operator sites are addressed by name; the index is always 0.
fn operator_sites(sites: &[SiteAddress]) -> Vec<UniqueSite> {
    sites
        .iter()
        .map(|s| UniqueSite {
            station: s.station_id.clone(),
            site_id: SiteId {
                name: s.site_name.clone(),
                index: 0,
            },
        })
        .collect()
}

/// An unconfigured station answers the defaults with one blank operator site per side.
fn station_config_data(config: &StationConfiguration) -> StationConfigData {
    let blank_sites = || vec![SiteAddress::default()];
    let value = config.collect.default_quantity.to_string();

    if *config == StationConfiguration::default() {
        return StationConfigData {
            separate_mode: false,
            feed: FeedConfigData {
                product_type: vec![],
                material_resource: true,
                operator_sites: blank_sites(),
                standard_quantity: FeedQuantitySource::FromRecipe,
            },
            collect: CollectConfigData {
                resource: true,
                carrier_resource: true,
                quantity: CollectQuantityData {
                    quantity_type: CollectQuantitySource::FromStationConfigs.value(),
                    value,
                },
                operator_sites: blank_sites(),
            },
        };
    }

    let split = config.split_feed_and_collect;
    let sites_of = |sites: &[UniqueSite]| -> Vec<SiteAddress> {
        if split {
            sites
                .iter()
                .map(|s| SiteAddress {
                    station_id: s.station.clone(),
                    site_name: s.site_id.name.clone(),
                    site_index: s.site_id.index,
                })
                .collect()
        } else {
            blank_sites()
        }
    };

    StationConfigData {
        separate_mode: split,
        feed: FeedConfigData {
            product_type: config.feed.product_types.clone(),
            material_resource: config.feed.need_material_resource,
            operator_sites: sites_of(&config.feed.operator_sites),
            standard_quantity: if split {
                config.feed.quantity_source
            } else {
                FeedQuantitySource::FromRecipe
            },
        },
        collect: CollectConfigData {
            resource: config.collect.need_collect_resource,
            carrier_resource: config.collect.need_carrier_resource,
            quantity: CollectQuantityData {
                quantity_type: config.collect.quantity_source.value(),
                value,
            },
            operator_sites: sites_of(&config.collect.operator_sites),
        },
    }
}
