use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{DomainError, Result};
use crate::utils::{hour_bucket_label, timestamp_secs_to_datetime};

/// 單一物品在單一小時桶的價格紀錄
///
/// `(item_id, timestamp)` 在合併後的歷史中唯一。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesRecord {
    pub item_id: i64,
    /// 桶起點（unix 秒）
    pub timestamp: i64,
    pub avg_high_price: Option<i64>,
    pub avg_low_price: Option<i64>,
    pub high_price_volume: i64,
    pub low_price_volume: i64,
    pub datetime: DateTime<Utc>,
    /// "YYYY-MM-DD HH"（UTC）
    pub hour_bucket: String,
}

impl TimeseriesRecord {
    /// 建立紀錄並推導 datetime 與小時標籤
    pub fn new(
        item_id: i64,
        timestamp: i64,
        avg_high_price: Option<i64>,
        avg_low_price: Option<i64>,
        high_price_volume: i64,
        low_price_volume: i64,
    ) -> Result<Self> {
        let datetime =
            timestamp_secs_to_datetime(timestamp).ok_or(DomainError::InvalidTimestamp(timestamp))?;

        Ok(Self {
            item_id,
            timestamp,
            avg_high_price,
            avg_low_price,
            high_price_volume,
            low_price_volume,
            hour_bucket: hour_bucket_label(&datetime),
            datetime,
        })
    }

    /// 唯一鍵 (item_id, timestamp)
    pub fn key(&self) -> (i64, i64) {
        (self.item_id, self.timestamp)
    }
}
