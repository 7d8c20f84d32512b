//! 樹苗套利評估：成品與前置物品保守價格的差額

use super::error::{EvaluationResult, StrategyError};
use super::result::{StrategyKind, StrategyResult};
use crate::domain_types::{AggregateRow, AggregateTable};
use crate::items::SaplingSeed;

const KIND: StrategyKind = StrategyKind::Arbitrage;

/// 保守價格：最新低價、最新高價與歷史中位數中的最小值（忽略空值）
pub fn price_floor(row: &AggregateRow) -> Option<f64> {
    [
        row.last_avg_low.map(|v| v as f64),
        row.last_avg_high.map(|v| v as f64),
        row.median_avg_high,
    ]
    .into_iter()
    .flatten()
    .reduce(f64::min)
}

fn floor_of(aggregates: &AggregateTable, item_id: i64) -> EvaluationResult<(&AggregateRow, f64)> {
    let row = aggregates
        .get(item_id)
        .ok_or(StrategyError::MissingData { item_id, evaluator: KIND })?;
    let floor = price_floor(row).ok_or(StrategyError::MissingPrice {
        item_id,
        field: "price floor",
        evaluator: KIND,
    })?;
    Ok((row, floor))
}

/// 評估單一成品的套利獲利，前置物品透過對照表查找
///
/// 此評估不給出購買建議，只有獲利數字。
pub fn evaluate_arbitrage(
    aggregates: &AggregateTable,
    finished_id: i64,
    mapping: &[SaplingSeed],
) -> EvaluationResult<StrategyResult> {
    let precursor_id = mapping
        .iter()
        .find(|pair| pair.sapling_id == finished_id)
        .map(|pair| pair.seed_id)
        .ok_or(StrategyError::UnmappedItem {
            item_id: finished_id,
            evaluator: KIND,
        })?;

    let (finished, finished_floor) = floor_of(aggregates, finished_id)?;
    let (_, precursor_floor) = floor_of(aggregates, precursor_id)?;
    let profit = finished_floor - precursor_floor;

    tracing::debug!("套利評估 {} ← {}: 獲利 {}", finished_id, precursor_id, profit);

    Ok(StrategyResult {
        item_id: finished_id,
        name: finished.name.clone(),
        kind: KIND,
        profit,
        discount: None,
        verdict: None,
        price_range: None,
    })
}
