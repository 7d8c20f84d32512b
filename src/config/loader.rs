use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use std::env;
use std::path::{Path, PathBuf};

/// 環境變數前綴，例如 `PRICE_REPORT_API__TIMEOUT_SECS=10`
pub const ENV_PREFIX: &str = "PRICE_REPORT";

/// 環境類型枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 從環境變數取得當前環境設定
    pub fn from_env() -> Self {
        match env::var("PRICE_REPORT_ENV")
            .unwrap_or_else(|_| "development".into())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// 環境專屬配置檔名
    pub fn as_filename(&self) -> &'static str {
        match self {
            Environment::Development => "development.toml",
            Environment::Production => "production.toml",
        }
    }
}

/// 分層配置加載：內建預設 → default.toml → 環境檔 → 環境變數
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置目錄，可由 CONFIG_DIR 覆蓋
    pub fn config_dir() -> PathBuf {
        PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".into()))
    }

    /// 載入指定環境的配置
    pub fn load(env: Environment) -> Result<Config, ConfigError> {
        Self::load_from_dir(Self::config_dir(), env)
    }

    /// 從指定目錄載入配置，所有檔案皆為可選
    pub fn load_from_dir(config_dir: impl AsRef<Path>, env: Environment) -> Result<Config, ConfigError> {
        let config_dir = config_dir.as_ref();

        let mut config_builder = Self::with_defaults(Config::builder())?;

        config_builder = config_builder
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(env.as_filename())).required(false));

        // 從環境變數加載配置（優先級高於文件配置）
        config_builder = config_builder.add_source(
            ConfigEnvironment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        config_builder.build()
    }

    /// 內建預設值，沒有任何配置檔時仍可執行
    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("api.mapping_url", "https://prices.runescape.wiki/api/v1/osrs/mapping")?
            .set_default("api.timeseries_url", "https://prices.runescape.wiki/api/v1/osrs/timeseries")?
            .set_default("api.timestep", "1h")?
            .set_default("api.user_agent", "Major Discount Notification 0.1")?
            .set_default("api.contact", "price-report@example.com")?
            .set_default("api.timeout_secs", 30_i64)?
            .set_default("storage.data_dir", "data")?
            .set_default("storage.history_file", "osrs_timeseries_df.parquet")?
            .set_default("report.output_dir", "public")?
            .set_default("report.output_file", "output.html")?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")
    }
}
