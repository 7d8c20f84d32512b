#![allow(dead_code)]

use async_trait::async_trait;
use ge_price_report::data_ingestion::{FetchError, PriceSource};
use ge_price_report::domain_types::{
    AggregateRow, AggregateTable, Catalog, CatalogEntry, HistoryFrame, TimeseriesRecord,
};
use serde_json::{json, Value};
use std::collections::HashMap;

pub fn record(item_id: i64, timestamp: i64, high: Option<i64>, low: Option<i64>) -> TimeseriesRecord {
    TimeseriesRecord::new(item_id, timestamp, high, low, 10, 5).unwrap()
}

pub fn history(rows: &[(i64, i64, Option<i64>, Option<i64>)]) -> HistoryFrame {
    let records: Vec<TimeseriesRecord> = rows
        .iter()
        .map(|(id, ts, high, low)| record(*id, *ts, *high, *low))
        .collect();
    HistoryFrame::from_records(&records).unwrap()
}

pub fn catalog_entry(id: i64, name: &str, highalch: Option<f64>) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        examine: String::new(),
        members: true,
        lowalch: None,
        highalch,
        limit: None,
        value: 1,
        icon: format!("{id}.png"),
    }
}

pub fn catalog(entries: &[(i64, &str, Option<f64>)]) -> Catalog {
    Catalog::from_entries(
        entries
            .iter()
            .map(|(id, name, highalch)| catalog_entry(*id, name, *highalch)),
    )
}

pub fn aggregate_row(
    item_id: i64,
    name: &str,
    last_high: Option<i64>,
    last_low: Option<i64>,
    median: Option<f64>,
) -> AggregateRow {
    AggregateRow {
        item_id,
        median_avg_high: median,
        last_avg_high: last_high,
        last_avg_low: last_low,
        last_timestamp: 3600,
        name: name.to_string(),
        high_alch: None,
        members: true,
    }
}

pub fn aggregates(rows: Vec<AggregateRow>) -> AggregateTable {
    AggregateTable::from_rows(rows)
}

/// 記憶體中的價格來源，未登錄的物品回傳 404
#[derive(Default)]
pub struct FakeSource {
    pub mapping: Option<Vec<Value>>,
    pub series: HashMap<i64, Value>,
}

impl FakeSource {
    pub fn with_mapping(entries: &[(i64, &str, Option<i64>)]) -> Self {
        let mapping = entries
            .iter()
            .map(|(id, name, highalch)| {
                json!({
                    "id": id,
                    "name": name,
                    "examine": "",
                    "members": true,
                    "value": 1,
                    "icon": format!("{id}.png"),
                    "highalch": highalch,
                })
            })
            .collect();
        Self {
            mapping: Some(mapping),
            series: HashMap::new(),
        }
    }

    /// 每個點為 (timestamp, avgHighPrice, avgLowPrice)
    pub fn series(mut self, item_id: i64, points: &[(i64, Option<i64>, Option<i64>)]) -> Self {
        let data: Vec<Value> = points
            .iter()
            .map(|(ts, high, low)| {
                json!({
                    "timestamp": ts,
                    "avgHighPrice": high,
                    "avgLowPrice": low,
                    "highPriceVolume": 10,
                    "lowPriceVolume": 5,
                })
            })
            .collect();
        self.series.insert(item_id, json!({ "data": data, "itemId": item_id }));
        self
    }
}

#[async_trait]
impl PriceSource for FakeSource {
    async fn fetch_mapping(&self) -> Result<Vec<Value>, FetchError> {
        self.mapping.clone().ok_or(FetchError::Status {
            status: 503,
            body: "unavailable".into(),
        })
    }

    async fn fetch_timeseries(&self, item_id: i64) -> Result<Value, FetchError> {
        self.series.get(&item_id).cloned().ok_or(FetchError::Status {
            status: 404,
            body: format!("no series for {item_id}"),
        })
    }
}
