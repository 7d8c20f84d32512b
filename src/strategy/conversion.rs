//! 高級煉金轉換評估
//!
//! 以成品的高級煉金價值扣除投入物品、固定成本與主要購入物品（法球、弓弦）
//! 的最新高價，得到每次轉換的獲利。

use super::error::{EvaluationResult, StrategyError};
use super::result::{discount_ratio, PriceRange, StrategyKind, StrategyResult, Verdict};
use crate::domain_types::{AggregateRow, AggregateTable, Catalog};
use crate::items::{BowConversion, StaffConversion, BATTLESTAFF_COST, BOWSTRING_ID, NATURE_RUNE_ID};

const KIND: StrategyKind = StrategyKind::Conversion;

/// 轉換評估參數
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSpec {
    /// 被高級煉金的成品
    pub target_id: i64,
    /// 以最新高價計入成本的投入物品
    pub input_ids: Vec<i64>,
    /// 不隨市場變動的固定成本
    pub fixed_cost: f64,
    /// 評估是否購入的物品
    pub subject_id: i64,
}

impl ConversionSpec {
    /// 戰鬥法杖：法杖煉金價 − (自然符文 + 空白法杖) − 法球
    pub fn battlestaff(staff: &StaffConversion) -> Self {
        Self {
            target_id: staff.battlestaff_id,
            input_ids: vec![NATURE_RUNE_ID],
            fixed_cost: BATTLESTAFF_COST as f64,
            subject_id: staff.orb_id,
        }
    }

    /// 弓：弓煉金價 − (自然符文 + 原木) − 弓弦
    pub fn bow(bow: &BowConversion) -> Self {
        Self {
            target_id: bow.bow_id,
            input_ids: vec![NATURE_RUNE_ID, bow.log_id],
            fixed_cost: 0.0,
            subject_id: BOWSTRING_ID,
        }
    }
}

fn require_row(aggregates: &AggregateTable, item_id: i64) -> EvaluationResult<&AggregateRow> {
    aggregates
        .get(item_id)
        .ok_or(StrategyError::MissingData { item_id, evaluator: KIND })
}

fn last_high(row: &AggregateRow) -> EvaluationResult<i64> {
    row.last_avg_high.ok_or(StrategyError::MissingPrice {
        item_id: row.item_id,
        field: "last_avgHighPrice",
        evaluator: KIND,
    })
}

/// 評估一次轉換
///
/// 成品的高級煉金價值取自物品目錄（成品本身不抓取時間序列）。
pub fn evaluate_conversion(
    catalog: &Catalog,
    aggregates: &AggregateTable,
    spec: &ConversionSpec,
) -> EvaluationResult<StrategyResult> {
    let target = catalog.get(spec.target_id).ok_or(StrategyError::MissingCatalogEntry {
        item_id: spec.target_id,
        evaluator: KIND,
    })?;
    let high_alch = target.highalch.ok_or(StrategyError::MissingPrice {
        item_id: spec.target_id,
        field: "highalch",
        evaluator: KIND,
    })?;

    let mut input_cost = 0.0;
    for input_id in &spec.input_ids {
        input_cost += last_high(require_row(aggregates, *input_id)?)? as f64;
    }

    let subject = require_row(aggregates, spec.subject_id)?;
    let subject_price = last_high(subject)?;

    let profit = high_alch - (input_cost + spec.fixed_cost) - subject_price as f64;
    let verdict = Verdict::from_profit(profit);
    let price_range = (verdict == Verdict::Buy).then_some(PriceRange {
        low: subject.last_avg_low,
        high: subject.last_avg_high,
    });

    tracing::debug!(
        "轉換評估 {} (成品 {}): 獲利 {}，建議 {}",
        subject.name,
        spec.target_id,
        profit,
        verdict
    );

    Ok(StrategyResult {
        item_id: subject.item_id,
        name: subject.name.clone(),
        kind: KIND,
        profit,
        discount: discount_ratio(subject_price, subject.median_avg_high),
        verdict: Some(verdict),
        price_range,
    })
}
