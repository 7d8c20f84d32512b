use thiserror::Error;

use crate::domain_types::DomainError;

/// 遠端抓取錯誤
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP 請求失敗: {0}")]
    Http(reqwest::Error),

    #[error("請求逾時: {0}")]
    Timeout(reqwest::Error),

    #[error("API 回應錯誤 {status}: {body}")]
    Status { status: u16, body: String },

    #[error("回應格式錯誤: {0}")]
    Decode(String),

    #[error("無效的請求標頭 {header}: {message}")]
    InvalidHeader { header: &'static str, message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Http(err)
        }
    }
}

/// 正規化錯誤，單筆紀錄被拒絕時回報
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("缺失必要欄位: {field} (物品 {item_id:?})")]
    MissingField {
        item_id: Option<i64>,
        field: &'static str,
    },

    #[error("欄位格式錯誤 (物品 {item_id:?}): {message}")]
    InvalidRecord {
        item_id: Option<i64>,
        message: String,
    },

    #[error("數據值範圍錯誤: {field} = {value} (物品 {item_id:?})")]
    OutOfRange {
        item_id: Option<i64>,
        field: &'static str,
        value: i64,
    },

    #[error("回應缺少 data 陣列 (物品 {item_id})")]
    MissingDataArray { item_id: i64 },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type NormalizationResult<T> = Result<T, NormalizationError>;

/// 單一物品的抓取與正規化錯誤
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}
