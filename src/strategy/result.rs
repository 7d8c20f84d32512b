use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

/// 評估器類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StrategyKind {
    /// 高級煉金轉換（法杖、弓）
    Conversion,
    /// 樹苗與種子套利
    Arbitrage,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Conversion => write!(f, "conversion"),
            StrategyKind::Arbitrage => write!(f, "arbitrage"),
        }
    }
}

/// 購買建議
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Buy,
    DontBuy,
}

impl Verdict {
    pub fn from_profit(profit: f64) -> Self {
        if profit >= 0.0 {
            Verdict::Buy
        } else {
            Verdict::DontBuy
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Buy => write!(f, "Buy"),
            Verdict::DontBuy => write!(f, "Don't Buy"),
        }
    }
}

/// 最新成交價區間，作為下單參考
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub low: Option<i64>,
    pub high: Option<i64>,
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: Option<i64>| value.map_or_else(|| "n/a".to_string(), |v| v.to_string());
        write!(f, "between {} and {}", show(self.low), show(self.high))
    }
}

/// 單次評估結果，不持久化
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyResult {
    pub item_id: i64,
    pub name: String,
    pub kind: StrategyKind,
    pub profit: f64,
    /// 最新價 ÷ 歷史中位數，小數兩位
    pub discount: Option<Decimal>,
    pub verdict: Option<Verdict>,
    pub price_range: Option<PriceRange>,
}

/// 折扣比率：最新價 ÷ 歷史中位數，四捨五入（遠離零）到小數兩位
///
/// 中位數不存在或為零時回傳 None。
pub fn discount_ratio(last_price: i64, median: Option<f64>) -> Option<Decimal> {
    let median = Decimal::from_f64(median?)?;
    if median.is_zero() {
        return None;
    }

    Decimal::from(last_price)
        .checked_div(median)
        .map(|ratio| ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
