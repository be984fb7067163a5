use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BatchStatus, UniqueSite};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBatchRequest {
    pub work_order: String,
    pub number: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInfo {
    pub work_order: String,
    pub number: i16,
    pub status: BatchStatus,
    #[serde(default)]
    pub records: Vec<FeedRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBatchReply {
    pub info: BatchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBatchRequest {
    pub work_order: String,
    pub number: i16,
    pub status: BatchStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBatchRequest {
    pub work_order: String,
    pub number: i16,
    pub status: BatchStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchId {
    pub work_order: String,
    pub number: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPerSite {
    pub site: UniqueSite,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRequest {
    pub batch: BatchId,
    pub feed_content: Vec<FeedPerSite>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollectRecordRequest {
    pub work_order: String,
    pub lot_number: String,
    pub sequence: i16,
    pub quantity: Decimal,
    pub station: String,
    pub resource_oid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLimitaryHourRequest {
    pub product_type: String,
}

/// Shelf life bounds in hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitaryHour {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetLimitaryHourReply {
    pub limitary_hour: LimitaryHour,
}
