//! 增量歷史存放
//!
//! 價格 API 每個物品最多回傳 365 個小時桶，更早的資料只存在於本地歷史檔案。
//! 每次執行讀取一次、與新抓取的資料合併，再整份覆寫回 parquet（zstd 壓縮）。

use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::error::{StorageError, StorageResult};
use crate::domain_types::{ColumnName, DomainError, HistoryFrame};

/// 合併時暫存每個物品新資料最小時間戳的欄位
const FRESH_CUTOFF: &str = "__fresh_cutoff";

/// 單一 parquet 歷史檔案
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 讀取既有歷史；檔案不存在時回傳空歷史
    pub fn load(&self) -> StorageResult<HistoryFrame> {
        if !self.path.exists() {
            tracing::info!("歷史檔案 {} 不存在，從空歷史開始", self.path.display());
            return Ok(HistoryFrame::empty());
        }

        let file = File::open(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        let df = ParquetReader::new(file)
            .finish()
            .map_err(|e| self.corrupt(DomainError::Frame(e)))?;

        let frame = HistoryFrame::from_dataframe(&df).map_err(|e| self.corrupt(e))?;
        tracing::info!("讀取歷史 {} 筆 ({})", frame.height(), self.path.display());
        Ok(frame)
    }

    /// 讀取既有歷史；檔案損毀或無法讀取時記錄警告並回傳空歷史
    pub fn load_or_empty(&self) -> HistoryFrame {
        match self.load() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("無法讀取既有歷史，視為無歷史資料: {}", e);
                HistoryFrame::empty()
            }
        }
    }

    /// 整份覆寫歷史檔案
    ///
    /// 先寫入同目錄的暫存檔再改名，寫入中途失敗不會破壞舊檔。
    pub fn persist(&self, merged: &HistoryFrame) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut df = merged.dataframe().clone();
        self.write_atomically(|file| {
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Zstd(None))
                .finish(&mut df)?;
            Ok(())
        })?;

        tracing::info!("寫入歷史 {} 筆 ({})", merged.height(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("parquet.tmp")
    }

    /// 寫入暫存檔後改名覆蓋；寫入或改名失敗時刪除暫存檔
    fn write_atomically<F>(&self, write: F) -> StorageResult<()>
    where
        F: FnOnce(&mut File) -> StorageResult<()>,
    {
        let tmp_path = self.tmp_path();
        let mut file = File::create(&tmp_path).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;

        let written = write(&mut file);
        drop(file);

        let result = written.and_then(|()| {
            fs::rename(&tmp_path, &self.path).map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
        });

        if result.is_err() {
            if let Err(e) = fs::remove_file(&tmp_path) {
                tracing::warn!("無法刪除暫存檔 {}: {}", tmp_path.display(), e);
            }
        }
        result
    }

    fn corrupt(&self, source: DomainError) -> StorageError {
        StorageError::Corrupt {
            path: self.path.clone(),
            source,
        }
    }
}

/// 合併既有歷史與新抓取資料
///
/// 對每個物品，以新資料中該物品的最小時間戳為界：
/// 早於界線的既有紀錄保留，界線之後（含）一律以新資料為準。
/// 新資料中沒有的物品保留全部既有紀錄。結果依 (id, timestamp) 排序。
pub fn merge(existing: &HistoryFrame, fresh: &HistoryFrame) -> StorageResult<HistoryFrame> {
    let columns: Vec<Expr> = HistoryFrame::column_names().iter().map(|name| col(*name)).collect();

    let cutoffs = fresh
        .lazy()
        .group_by([col(ColumnName::ITEM_ID)])
        .agg([col(ColumnName::TIMESTAMP).min().alias(FRESH_CUTOFF)]);

    let retained = existing
        .lazy()
        .join(
            cutoffs,
            [col(ColumnName::ITEM_ID)],
            [col(ColumnName::ITEM_ID)],
            JoinArgs::new(JoinType::Left),
        )
        .filter(
            col(FRESH_CUTOFF)
                .is_null()
                .or(col(ColumnName::TIMESTAMP).lt(col(FRESH_CUTOFF))),
        )
        .select(columns.clone());

    let merged = concat([retained, fresh.lazy().select(columns)], UnionArgs::default())?
        .sort_by_exprs(
            [col(ColumnName::ITEM_ID), col(ColumnName::TIMESTAMP)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    tracing::debug!(
        "合併歷史: 既有 {} 筆 + 新資料 {} 筆 → {} 筆",
        existing.height(),
        fresh.height(),
        merged.height()
    );

    Ok(HistoryFrame::from_validated(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::TimeseriesRecord;

    fn frame(rows: &[(i64, i64, Option<i64>)]) -> HistoryFrame {
        let records: Vec<TimeseriesRecord> = rows
            .iter()
            .map(|(id, ts, high)| TimeseriesRecord::new(*id, *ts, *high, None, 1, 1).unwrap())
            .collect();
        HistoryFrame::from_records(&records).unwrap()
    }

    #[test]
    fn test_failed_write_removes_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.parquet"));
        store.persist(&frame(&[(5, 100, Some(1))])).unwrap();

        let result = store.write_atomically(|_| {
            Err(StorageError::Polars(PolarsError::ComputeError("寫入中斷".into())))
        });

        assert!(result.is_err());
        assert!(!store.tmp_path().exists());
        // 舊檔不受影響
        assert_eq!(store.load().unwrap().keys().unwrap(), vec![(5, 100)]);
    }

    #[test]
    fn test_merge_with_empty_existing() {
        let fresh = frame(&[(5, 200, Some(1)), (5, 100, Some(2))]);
        let merged = merge(&HistoryFrame::empty(), &fresh).unwrap();
        assert_eq!(merged.keys().unwrap(), vec![(5, 100), (5, 200)]);
    }

    #[test]
    fn test_merge_with_empty_fresh_keeps_everything() {
        let existing = frame(&[(5, 100, Some(1)), (6, 100, Some(2))]);
        let merged = merge(&existing, &HistoryFrame::empty()).unwrap();
        assert_eq!(merged.height(), 2);
    }

    #[test]
    fn test_merge_output_sorted_by_id_then_timestamp() {
        let existing = frame(&[(6, 50, None), (5, 50, None)]);
        let fresh = frame(&[(6, 300, None), (5, 100, None)]);
        let merged = merge(&existing, &fresh).unwrap();

        let records = merged.to_records().unwrap();
        let keys: Vec<(i64, i64)> = records.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec![(5, 50), (5, 100), (6, 50), (6, 300)]);
    }
}
