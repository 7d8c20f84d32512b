//! 基本類型定義：標準列名與領域錯誤

use polars::prelude::PolarsError;
use thiserror::Error;

/// 領域錯誤類型
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("無效的時間戳: {0}")]
    InvalidTimestamp(i64),

    #[error("缺少必要欄位: {field} (第 {row} 列)")]
    MissingRequiredField { field: String, row: usize },

    #[error("資料框操作錯誤: {0}")]
    Frame(#[from] PolarsError),
}

/// 領域結果類型
pub type Result<T> = std::result::Result<T, DomainError>;

/// 標準列名定義，與價格 API 的欄位名稱一致
pub struct ColumnName;

impl ColumnName {
    pub const ITEM_ID: &'static str = "id";
    pub const TIMESTAMP: &'static str = "timestamp"; // unix 秒，桶起點
    pub const AVG_HIGH_PRICE: &'static str = "avgHighPrice";
    pub const AVG_LOW_PRICE: &'static str = "avgLowPrice";
    pub const HIGH_PRICE_VOLUME: &'static str = "highPriceVolume";
    pub const LOW_PRICE_VOLUME: &'static str = "lowPriceVolume";
    pub const DATETIME: &'static str = "datetime"; // 毫秒精度
    pub const HOUR_BUCKET: &'static str = "ymd_h";

    // 聚合結果
    pub const MEDIAN_AVG_HIGH: &'static str = "med_avgHighPrice";
    pub const LAST_AVG_HIGH: &'static str = "last_avgHighPrice";
    pub const LAST_AVG_LOW: &'static str = "last_avgLowPrice";
    pub const LAST_TIMESTAMP: &'static str = "last_timestamp";

    // 物品目錄
    pub const NAME: &'static str = "name";
    pub const HIGH_ALCH: &'static str = "highalch";
    pub const MEMBERS: &'static str = "members";
}
