use thiserror::Error;

use super::result::StrategyKind;

/// 策略評估錯誤
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrategyError {
    #[error("{evaluator} 評估缺少物品 {item_id} 的聚合資料")]
    MissingData { item_id: i64, evaluator: StrategyKind },

    #[error("{evaluator} 評估在物品目錄中找不到物品 {item_id}")]
    MissingCatalogEntry { item_id: i64, evaluator: StrategyKind },

    #[error("{evaluator} 評估所需物品 {item_id} 的 {field} 為空值")]
    MissingPrice {
        item_id: i64,
        field: &'static str,
        evaluator: StrategyKind,
    },

    #[error("{evaluator} 評估找不到物品 {item_id} 的前置物品對照")]
    UnmappedItem { item_id: i64, evaluator: StrategyKind },
}

impl StrategyError {
    /// 導致錯誤的物品 id
    pub fn item_id(&self) -> i64 {
        match self {
            Self::MissingData { item_id, .. }
            | Self::MissingCatalogEntry { item_id, .. }
            | Self::MissingPrice { item_id, .. }
            | Self::UnmappedItem { item_id, .. } => *item_id,
        }
    }

    pub fn evaluator(&self) -> StrategyKind {
        match self {
            Self::MissingData { evaluator, .. }
            | Self::MissingCatalogEntry { evaluator, .. }
            | Self::MissingPrice { evaluator, .. }
            | Self::UnmappedItem { evaluator, .. } => *evaluator,
        }
    }
}

pub type EvaluationResult<T> = Result<T, StrategyError>;
