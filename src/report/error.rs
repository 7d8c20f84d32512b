use std::path::PathBuf;
use thiserror::Error;

/// 報表輸出錯誤
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("無法建立輸出目錄 {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("無法寫入報表 {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;
