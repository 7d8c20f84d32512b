//! 價格 API 回應的正規化
//!
//! 將 mapping 與 timeseries 端點的 JSON 轉換為固定型別的紀錄。
//! 缺少必要欄位或型別錯誤的紀錄會被拒絕並附上原因，其餘紀錄照常保留。

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::error::{NormalizationError, NormalizationResult};
use super::traits::RecordNormalizer;
use crate::domain_types::{CatalogEntry, TimeseriesRecord};

#[derive(Debug, Deserialize)]
struct RawCatalogEntry {
    id: Option<i64>,
    name: Option<String>,
    examine: Option<String>,
    members: Option<bool>,
    lowalch: Option<f64>,
    highalch: Option<f64>,
    limit: Option<f64>,
    value: Option<i64>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeseriesPoint {
    timestamp: Option<i64>,
    avg_high_price: Option<i64>,
    avg_low_price: Option<i64>,
    high_price_volume: Option<i64>,
    low_price_volume: Option<i64>,
}

fn raw_item_id(raw: &Value) -> Option<i64> {
    raw.get("id").and_then(Value::as_i64)
}

fn required<T>(value: Option<T>, item_id: Option<i64>, field: &'static str) -> NormalizationResult<T> {
    value.ok_or(NormalizationError::MissingField { item_id, field })
}

/// 物品目錄正規化器
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogNormalizer;

impl RecordNormalizer for CatalogNormalizer {
    type Raw = Value;
    type Output = CatalogEntry;

    fn normalize_item(&self, raw: Value) -> NormalizationResult<CatalogEntry> {
        let item_id = raw_item_id(&raw);
        let entry: RawCatalogEntry =
            serde_json::from_value(raw).map_err(|e| NormalizationError::InvalidRecord {
                item_id,
                message: e.to_string(),
            })?;

        let id = required(entry.id, item_id, "id")?;
        let item_id = Some(id);

        Ok(CatalogEntry {
            id,
            name: required(entry.name, item_id, "name")?,
            examine: required(entry.examine, item_id, "examine")?,
            members: required(entry.members, item_id, "members")?,
            lowalch: entry.lowalch,
            highalch: entry.highalch,
            limit: entry.limit,
            value: required(entry.value, item_id, "value")?,
            icon: required(entry.icon, item_id, "icon")?,
        })
    }
}

/// 單一物品時間序列點的正規化器
#[derive(Debug, Clone, Copy)]
pub struct TimeseriesNormalizer {
    item_id: i64,
}

impl TimeseriesNormalizer {
    pub fn new(item_id: i64) -> Self {
        Self { item_id }
    }

    /// 正規化整個 timeseries 回應
    ///
    /// 回應必須含有 `data` 陣列，否則整份回應被拒絕。
    /// 同一時間桶重複出現時保留最後一筆，結果依時間排序。
    pub fn normalize_response(
        &self,
        response: Value,
    ) -> NormalizationResult<(Vec<TimeseriesRecord>, Vec<NormalizationError>)> {
        let points = match response {
            Value::Object(mut body) => match body.remove("data") {
                Some(Value::Array(points)) => points,
                _ => return Err(NormalizationError::MissingDataArray { item_id: self.item_id }),
            },
            _ => return Err(NormalizationError::MissingDataArray { item_id: self.item_id }),
        };

        let (records, rejected) = self.normalize_batch(points);

        let mut by_timestamp = BTreeMap::new();
        for record in records {
            by_timestamp.insert(record.timestamp, record);
        }

        Ok((by_timestamp.into_values().collect(), rejected))
    }

    fn non_negative(&self, value: i64, field: &'static str) -> NormalizationResult<i64> {
        if value < 0 {
            return Err(NormalizationError::OutOfRange {
                item_id: Some(self.item_id),
                field,
                value,
            });
        }
        Ok(value)
    }
}

impl RecordNormalizer for TimeseriesNormalizer {
    type Raw = Value;
    type Output = TimeseriesRecord;

    fn normalize_item(&self, raw: Value) -> NormalizationResult<TimeseriesRecord> {
        let item_id = Some(self.item_id);
        let point: RawTimeseriesPoint =
            serde_json::from_value(raw).map_err(|e| NormalizationError::InvalidRecord {
                item_id,
                message: e.to_string(),
            })?;

        let timestamp = required(point.timestamp, item_id, "timestamp")?;
        let high_volume = required(point.high_price_volume, item_id, "highPriceVolume")?;
        let low_volume = required(point.low_price_volume, item_id, "lowPriceVolume")?;

        Ok(TimeseriesRecord::new(
            self.item_id,
            timestamp,
            point.avg_high_price,
            point.avg_low_price,
            self.non_negative(high_volume, "highPriceVolume")?,
            self.non_negative(low_volume, "lowPriceVolume")?,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_catalog_entry_with_optional_fields_missing() {
        let raw = json!({
            "examine": "A magical staff.",
            "id": 1397,
            "members": true,
            "value": 15500,
            "icon": "Air battlestaff.png",
            "name": "Air battlestaff",
            "highalch": 9300
        });

        let entry = CatalogNormalizer.normalize_item(raw).unwrap();
        assert_eq!(entry.id, 1397);
        assert_eq!(entry.highalch, Some(9300.0));
        assert_eq!(entry.lowalch, None);
        assert_eq!(entry.limit, None);
    }

    #[test]
    fn test_catalog_entry_missing_name_rejected() {
        let raw = json!({
            "examine": "?",
            "id": 42,
            "members": false,
            "value": 1,
            "icon": "x.png"
        });

        assert_matches!(
            CatalogNormalizer.normalize_item(raw),
            Err(NormalizationError::MissingField { item_id: Some(42), field: "name" })
        );
    }

    #[test]
    fn test_catalog_entry_wrong_type_rejected() {
        let raw = json!({ "id": 42, "name": "x", "members": "yes" });
        assert_matches!(
            CatalogNormalizer.normalize_item(raw),
            Err(NormalizationError::InvalidRecord { item_id: Some(42), .. })
        );
    }

    #[test]
    fn test_timeseries_nullable_prices() {
        let normalizer = TimeseriesNormalizer::new(561);
        let (records, rejected) = normalizer
            .normalize_response(json!({
                "data": [
                    { "timestamp": 3600, "avgHighPrice": null, "avgLowPrice": 140, "highPriceVolume": 0, "lowPriceVolume": 12 },
                    { "timestamp": 7200, "avgHighPrice": 150, "highPriceVolume": 3, "lowPriceVolume": 0 }
                ],
                "itemId": 561
            }))
            .unwrap();

        assert!(rejected.is_empty());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].avg_high_price, None);
        assert_eq!(records[0].avg_low_price, Some(140));
        assert_eq!(records[1].avg_high_price, Some(150));
        assert_eq!(records[1].avg_low_price, None);
        assert_eq!(records[1].hour_bucket, "1970-01-01 02");
    }

    #[test]
    fn test_timeseries_bad_points_rejected_individually() {
        let normalizer = TimeseriesNormalizer::new(561);
        let (records, rejected) = normalizer
            .normalize_response(json!({
                "data": [
                    { "avgHighPrice": 1, "highPriceVolume": 1, "lowPriceVolume": 1 },
                    { "timestamp": 3600, "avgHighPrice": "cheap", "highPriceVolume": 1, "lowPriceVolume": 1 },
                    { "timestamp": 7200, "highPriceVolume": -1, "lowPriceVolume": 1 },
                    { "timestamp": 10800, "highPriceVolume": 1, "lowPriceVolume": 1 }
                ]
            }))
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, 10800);
        assert_eq!(rejected.len(), 3);
        assert_matches!(rejected[0], NormalizationError::MissingField { field: "timestamp", .. });
        assert_matches!(rejected[1], NormalizationError::InvalidRecord { .. });
        assert_matches!(rejected[2], NormalizationError::OutOfRange { field: "highPriceVolume", value: -1, .. });
    }

    #[test]
    fn test_timeseries_duplicate_bucket_keeps_last() {
        let normalizer = TimeseriesNormalizer::new(573);
        let (records, _) = normalizer
            .normalize_response(json!({
                "data": [
                    { "timestamp": 7200, "avgHighPrice": 1, "highPriceVolume": 1, "lowPriceVolume": 1 },
                    { "timestamp": 3600, "avgHighPrice": 2, "highPriceVolume": 1, "lowPriceVolume": 1 },
                    { "timestamp": 7200, "avgHighPrice": 3, "highPriceVolume": 1, "lowPriceVolume": 1 }
                ]
            }))
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, 3600);
        assert_eq!(records[1].avg_high_price, Some(3));
    }

    #[test]
    fn test_timeseries_missing_data_array() {
        let normalizer = TimeseriesNormalizer::new(573);
        assert_matches!(
            normalizer.normalize_response(json!({ "error": "rate limited" })),
            Err(NormalizationError::MissingDataArray { item_id: 573 })
        );
        assert_matches!(
            normalizer.normalize_response(json!([1, 2, 3])),
            Err(NormalizationError::MissingDataArray { item_id: 573 })
        );
    }
}
