//! 聚合器
//!
//! 對關注物品計算 avgHighPrice 的歷史中位數與最新一列，並與物品目錄做內連接。
//! 任何一側缺少的物品都會被丟棄，後續策略以顯式的查無資料錯誤處理。

use polars::prelude::*;
use thiserror::Error;

use crate::domain_types::{AggregateRow, AggregateTable, Catalog, ColumnName, HistoryFrame};
use crate::items::dedup_ids;

/// 聚合錯誤
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("聚合計算失敗: {0}")]
    Polars(#[from] PolarsError),

    #[error("聚合結果缺少必要欄位: {field} (第 {row} 列)")]
    MissingValue { field: &'static str, row: usize },
}

/// 依時間戳穩定排序後取最後一個值，時間戳相同時取輸入順序最後者
fn last_by_timestamp(column: &str) -> Expr {
    col(column)
        .sort_by(
            [col(ColumnName::TIMESTAMP)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .last()
}

/// 產生關注物品的聚合表
pub fn aggregate(
    history: &HistoryFrame,
    catalog: &Catalog,
    items_of_interest: &[i64],
) -> Result<AggregateTable, AggregationError> {
    let ids = dedup_ids(items_of_interest);
    let interest = DataFrame::new(vec![Column::new(ColumnName::ITEM_ID.into(), ids.clone())])?;

    let scoped = history.lazy().join(
        interest.lazy(),
        [col(ColumnName::ITEM_ID)],
        [col(ColumnName::ITEM_ID)],
        JoinArgs::new(JoinType::Inner),
    );

    let medians = scoped
        .clone()
        .group_by_stable([col(ColumnName::ITEM_ID)])
        .agg([col(ColumnName::AVG_HIGH_PRICE)
            .median()
            .alias(ColumnName::MEDIAN_AVG_HIGH)]);

    let latest = scoped
        .group_by_stable([col(ColumnName::ITEM_ID)])
        .agg([
            last_by_timestamp(ColumnName::AVG_HIGH_PRICE).alias(ColumnName::LAST_AVG_HIGH),
            last_by_timestamp(ColumnName::AVG_LOW_PRICE).alias(ColumnName::LAST_AVG_LOW),
            col(ColumnName::TIMESTAMP).max().alias(ColumnName::LAST_TIMESTAMP),
        ]);

    let catalog_frame = catalog.to_frame(&ids)?;

    let joined = medians
        .join(
            latest,
            [col(ColumnName::ITEM_ID)],
            [col(ColumnName::ITEM_ID)],
            JoinArgs::new(JoinType::Inner),
        )
        .join(
            catalog_frame.lazy(),
            [col(ColumnName::ITEM_ID)],
            [col(ColumnName::ITEM_ID)],
            JoinArgs::new(JoinType::Inner),
        )
        .select([
            col(ColumnName::ITEM_ID).cast(DataType::Int64),
            col(ColumnName::MEDIAN_AVG_HIGH).cast(DataType::Float64),
            col(ColumnName::LAST_AVG_HIGH).cast(DataType::Int64),
            col(ColumnName::LAST_AVG_LOW).cast(DataType::Int64),
            col(ColumnName::LAST_TIMESTAMP).cast(DataType::Int64),
            col(ColumnName::NAME),
            col(ColumnName::HIGH_ALCH).cast(DataType::Float64),
            col(ColumnName::MEMBERS),
        ])
        .collect()?;

    let rows = rows_from_frame(&joined)?;

    let dropped: Vec<i64> = ids
        .into_iter()
        .filter(|id| !rows.iter().any(|row| row.item_id == *id))
        .collect();
    if !dropped.is_empty() {
        tracing::debug!("以下物品缺少歷史或目錄資料，未列入聚合: {:?}", dropped);
    }

    Ok(AggregateTable::from_rows(rows))
}

fn rows_from_frame(df: &DataFrame) -> Result<Vec<AggregateRow>, AggregationError> {
    let ids = df.column(ColumnName::ITEM_ID)?.i64()?;
    let medians = df.column(ColumnName::MEDIAN_AVG_HIGH)?.f64()?;
    let last_high = df.column(ColumnName::LAST_AVG_HIGH)?.i64()?;
    let last_low = df.column(ColumnName::LAST_AVG_LOW)?.i64()?;
    let last_ts = df.column(ColumnName::LAST_TIMESTAMP)?.i64()?;
    let names = df.column(ColumnName::NAME)?.str()?;
    let high_alch = df.column(ColumnName::HIGH_ALCH)?.f64()?;
    let members = df.column(ColumnName::MEMBERS)?.bool()?;

    let mut rows = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        rows.push(AggregateRow {
            item_id: ids.get(row).ok_or(AggregationError::MissingValue {
                field: ColumnName::ITEM_ID,
                row,
            })?,
            median_avg_high: medians.get(row),
            last_avg_high: last_high.get(row),
            last_avg_low: last_low.get(row),
            last_timestamp: last_ts.get(row).ok_or(AggregationError::MissingValue {
                field: ColumnName::LAST_TIMESTAMP,
                row,
            })?,
            name: names.get(row).unwrap_or_default().to_string(),
            high_alch: high_alch.get(row),
            members: members.get(row).unwrap_or(false),
        });
    }

    Ok(rows)
}
