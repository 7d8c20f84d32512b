//! 獲利策略評估
//!
//! 每個評估器都是 (目錄, 聚合表, 物品參數) 的純函數。
//! 任何引用到的物品缺少資料時回傳具名錯誤，不會產生預設的零值。

pub mod arbitrage;
pub mod conversion;
pub mod error;
pub mod plan;
pub mod result;

pub use arbitrage::{evaluate_arbitrage, price_floor};
pub use conversion::{evaluate_conversion, ConversionSpec};
pub use error::{EvaluationResult, StrategyError};
pub use plan::{default_plan, run_plan, Evaluation, EvaluationOutcome};
pub use result::{discount_ratio, PriceRange, StrategyKind, StrategyResult, Verdict};
