//! 報表流程
//!
//! 目錄 → 時間序列 → 合併歷史 → 聚合 → 評估 → 報表，各階段之間以明確的值傳遞。

use chrono::{DateTime, Utc};
use polars::prelude::PolarsError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::aggregator::{aggregate, AggregationError};
use crate::config::ApplicationConfig;
use crate::data_ingestion::{collect_fresh_history, fetch_catalog, FetchError, PriceSource};
use crate::domain_types::HistoryFrame;
use crate::items::{items_of_interest, tracked_item_ids};
use crate::report::{ReportError, ReportWriter};
use crate::storage::{merge, HistoryStore, StorageError};
use crate::strategy::{default_plan, run_plan, Evaluation};

/// 中止整次執行的錯誤
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("無法取得物品目錄: {0}")]
    Catalog(#[source] FetchError),

    #[error("沒有任何可用資料：本次抓取為空且沒有既有歷史")]
    NoData,

    #[error("新資料轉換失敗: {0}")]
    Frame(#[from] PolarsError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// 單次執行摘要
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub catalog_entries: usize,
    pub fetched_items: usize,
    pub failed_items: Vec<i64>,
    pub rejected_records: usize,
    pub persisted_rows: usize,
    pub evaluations: usize,
    pub evaluation_failures: usize,
    pub report_path: PathBuf,
}

/// 報表流程，資料來源可替換
pub struct ReportPipeline<S> {
    source: S,
    store: HistoryStore,
    writer: ReportWriter,
    tracked: Vec<i64>,
    interest: Vec<i64>,
    plan: Vec<Evaluation>,
}

impl<S: PriceSource> ReportPipeline<S> {
    pub fn new(source: S, store: HistoryStore, writer: ReportWriter) -> Self {
        Self {
            source,
            store,
            writer,
            tracked: tracked_item_ids(),
            interest: items_of_interest(),
            plan: default_plan(),
        }
    }

    pub fn from_config(source: S, config: &ApplicationConfig) -> Self {
        Self::new(
            source,
            HistoryStore::new(config.storage.history_path()),
            ReportWriter::from_config(&config.report),
        )
    }

    /// 覆寫要抓取時間序列的物品
    pub fn with_tracked_items(mut self, ids: Vec<i64>) -> Self {
        self.tracked = ids;
        self
    }

    pub fn with_plan(mut self, plan: Vec<Evaluation>) -> Self {
        self.plan = plan;
        self
    }

    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let started_at = Utc::now();
        tracing::info!("開始產生價格報表，追蹤 {} 個物品", self.tracked.len());

        let catalog = fetch_catalog(&self.source)
            .await
            .map_err(PipelineError::Catalog)?;

        let fresh = collect_fresh_history(&self.source, &self.tracked).await;
        let existing = self.store.load_or_empty();

        if fresh.is_empty() && existing.is_empty() {
            tracing::error!("本次抓取沒有任何紀錄，且沒有既有歷史");
            return Err(PipelineError::NoData);
        }

        let fresh_frame = HistoryFrame::from_records(&fresh.records)?;
        let merged = merge(&existing, &fresh_frame)?;
        self.store.persist(&merged)?;

        let aggregates = aggregate(&merged, &catalog, &self.interest)?;
        tracing::info!("聚合完成: {} 個物品", aggregates.len());

        let outcomes = run_plan(&self.plan, &catalog, &aggregates);
        let evaluation_failures = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
        self.writer.write(&outcomes)?;

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            catalog_entries: catalog.len(),
            fetched_items: fresh.fetched_items,
            failed_items: fresh.failed_items,
            rejected_records: fresh.rejected_records,
            persisted_rows: merged.height(),
            evaluations: outcomes.len(),
            evaluation_failures,
            report_path: self.writer.path().to_path_buf(),
        };

        tracing::info!(
            "報表完成: 歷史 {} 筆，評估 {} 項（失敗 {} 項）",
            summary.persisted_rows,
            summary.evaluations,
            summary.evaluation_failures
        );
        Ok(summary)
    }
}
