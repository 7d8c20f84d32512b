use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 每個關注物品一列的聚合結果，不持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub item_id: i64,
    /// 全部歷史 avgHighPrice 中位數（忽略空值）
    pub median_avg_high: Option<f64>,
    pub last_avg_high: Option<i64>,
    pub last_avg_low: Option<i64>,
    pub last_timestamp: i64,
    pub name: String,
    pub high_alch: Option<f64>,
    pub members: bool,
}

/// 聚合表，以物品 id 做鍵值查找
#[derive(Debug, Clone, Default)]
pub struct AggregateTable {
    rows: BTreeMap<i64, AggregateRow>,
}

impl AggregateTable {
    pub fn from_rows(rows: impl IntoIterator<Item = AggregateRow>) -> Self {
        Self {
            rows: rows.into_iter().map(|row| (row.item_id, row)).collect(),
        }
    }

    /// 查無此物品時回傳 None，不會退回任何預設值
    pub fn get(&self, item_id: i64) -> Option<&AggregateRow> {
        self.rows.get(&item_id)
    }

    pub fn contains(&self, item_id: i64) -> bool {
        self.rows.contains_key(&item_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregateRow> {
        self.rows.values()
    }
}
