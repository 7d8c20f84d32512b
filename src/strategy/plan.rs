//! 固定評估計畫：法杖、弓、樹苗依序評估

use super::arbitrage::evaluate_arbitrage;
use super::conversion::{evaluate_conversion, ConversionSpec};
use super::error::EvaluationResult;
use super::result::StrategyResult;
use crate::domain_types::{AggregateTable, Catalog};
use crate::items::{BOW_CONVERSIONS, SAPLING_SEEDS, STAFF_CONVERSIONS};

/// 計畫中的單項評估
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Conversion(ConversionSpec),
    Arbitrage { finished_id: i64 },
}

impl Evaluation {
    /// 報表標題使用的物品 id（轉換為主要購入物品，套利為成品）
    pub fn subject_id(&self) -> i64 {
        match self {
            Evaluation::Conversion(spec) => spec.subject_id,
            Evaluation::Arbitrage { finished_id } => *finished_id,
        }
    }

    /// 評估失敗時的標題：目錄名稱，找不到時退回 `item {id}`
    pub fn label(&self, catalog: &Catalog) -> String {
        let id = self.subject_id();
        catalog
            .get(id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| format!("item {id}"))
    }

    pub fn run(&self, catalog: &Catalog, aggregates: &AggregateTable) -> EvaluationResult<StrategyResult> {
        match self {
            Evaluation::Conversion(spec) => evaluate_conversion(catalog, aggregates, spec),
            Evaluation::Arbitrage { finished_id } => {
                evaluate_arbitrage(aggregates, *finished_id, SAPLING_SEEDS)
            }
        }
    }
}

/// 評估結果與其標題
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome {
    pub label: String,
    pub result: EvaluationResult<StrategyResult>,
}

impl EvaluationOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// 報表的固定順序：戰鬥法杖、弓、樹苗
pub fn default_plan() -> Vec<Evaluation> {
    let staffs = STAFF_CONVERSIONS
        .iter()
        .map(|staff| Evaluation::Conversion(ConversionSpec::battlestaff(staff)));
    let bows = BOW_CONVERSIONS
        .iter()
        .map(|bow| Evaluation::Conversion(ConversionSpec::bow(bow)));
    let saplings = SAPLING_SEEDS.iter().map(|pair| Evaluation::Arbitrage {
        finished_id: pair.sapling_id,
    });

    staffs.chain(bows).chain(saplings).collect()
}

/// 依序執行計畫，每項失敗都記錄為 error 並保留在結果中
pub fn run_plan(
    plan: &[Evaluation],
    catalog: &Catalog,
    aggregates: &AggregateTable,
) -> Vec<EvaluationOutcome> {
    plan.iter()
        .map(|evaluation| {
            let label = evaluation.label(catalog);
            let result = evaluation.run(catalog, aggregates);
            if let Err(e) = &result {
                tracing::error!("{} 評估失敗: {}", label, e);
            }
            EvaluationOutcome { label, result }
        })
        .collect()
}
