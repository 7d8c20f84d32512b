use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain_types::DomainError;

/// 歷史存放錯誤
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("讀寫歷史檔案 {path} 失敗: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("歷史檔案 {path} 無法解析: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    #[error("資料框操作錯誤: {0}")]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type StorageResult<T> = Result<T, StorageError>;
