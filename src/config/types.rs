use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::config::validation::{ValidationError, ValidationUtils, Validator};

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub report: ReportConfig,
    pub log: LogConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.storage.validate()?;
        self.report.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

/// 價格 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub mapping_url: String,
    pub timeseries_url: String,
    pub timestep: String,
    /// 送出 User-Agent 標頭
    pub user_agent: String,
    /// 送出 From 標頭的聯絡信箱
    pub contact: String,
    pub timeout_secs: u64,
}

impl Validator for ApiConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::http_url(&self.mapping_url, "api.mapping_url")?;
        ValidationUtils::http_url(&self.timeseries_url, "api.timeseries_url")?;
        ValidationUtils::one_of(
            &self.timestep.as_str(),
            &["5m", "1h", "6h", "24h"],
            "api.timestep",
        )?;
        ValidationUtils::not_empty(&self.user_agent, "api.user_agent")?;
        ValidationUtils::not_empty(&self.contact, "api.contact")?;
        ValidationUtils::in_range(self.timeout_secs, 1, 600, "api.timeout_secs")?;

        Ok(())
    }
}

impl ApiConfig {
    /// 單次請求超時
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 歷史資料存放配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    pub history_file: String,
}

impl Validator for StorageConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.data_dir, "storage.data_dir")?;
        ValidationUtils::not_empty(&self.history_file, "storage.history_file")?;

        Ok(())
    }
}

impl StorageConfig {
    /// 歷史 parquet 檔案完整路徑
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.history_file)
    }
}

/// 報表輸出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_dir: String,
    pub output_file: String,
}

impl Validator for ReportConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.output_dir, "report.output_dir")?;
        ValidationUtils::not_empty(&self.output_file, "report.output_file")?;

        Ok(())
    }
}

impl ReportConfig {
    /// 報表輸出完整路徑
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.output_file)
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase().as_str(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(
            &self.format.to_lowercase().as_str(),
            &["pretty", "compact"],
            "log.format",
        )?;

        Ok(())
    }
}
