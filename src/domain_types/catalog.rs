use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::ColumnName;

/// 物品目錄條目（mapping API 的一列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub examine: String,
    pub members: bool,
    pub lowalch: Option<f64>,
    pub highalch: Option<f64>,
    /// 每四小時交易上限
    pub limit: Option<f64>,
    pub value: i64,
    pub icon: String,
}

/// 以物品 id 為鍵的完整目錄快照，每次執行整體刷新
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<i64, CatalogEntry>,
}

impl Catalog {
    /// 由條目建立目錄，重複 id 以最後一筆為準
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            if let Some(previous) = map.insert(entry.id, entry) {
                tracing::warn!("目錄中物品 id {} 重複，保留最後一筆", previous.id);
            }
        }
        Self { entries: map }
    }

    pub fn get(&self, id: i64) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// 產生聚合 join 用的資料框（id, name, highalch, members），僅含指定物品
    pub fn to_frame(&self, ids: &[i64]) -> PolarsResult<DataFrame> {
        let selected: Vec<&CatalogEntry> = ids.iter().filter_map(|id| self.get(*id)).collect();

        let id_col: Vec<i64> = selected.iter().map(|e| e.id).collect();
        let name_col: Vec<&str> = selected.iter().map(|e| e.name.as_str()).collect();
        let highalch_col: Vec<Option<f64>> = selected.iter().map(|e| e.highalch).collect();
        let members_col: Vec<bool> = selected.iter().map(|e| e.members).collect();

        DataFrame::new(vec![
            Column::new(ColumnName::ITEM_ID.into(), id_col),
            Column::new(ColumnName::NAME.into(), name_col),
            Column::new(ColumnName::HIGH_ALCH.into(), highalch_col),
            Column::new(ColumnName::MEMBERS.into(), members_col),
        ])
    }
}
