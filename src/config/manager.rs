use config::ConfigError;
use std::path::Path;
use tracing::debug;
use crate::config::types::ApplicationConfig;
use crate::config::loader::{ConfigLoader, Environment};
use crate::config::validation::Validator;

/// 載入並驗證當前環境的配置（在應用程序啟動時調用）
pub fn load_config() -> Result<ApplicationConfig, ConfigError> {
    ApplicationConfig::load_from_env()
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env)
    }

    /// 從指定環境加載配置
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        Self::load_from_dir(ConfigLoader::config_dir(), env)
    }

    /// 從指定目錄與環境加載配置
    pub fn load_from_dir(config_dir: impl AsRef<Path>, env: Environment) -> Result<Self, ConfigError> {
        let config_source = ConfigLoader::load_from_dir(config_dir, env)?;

        // 使用 serde 反序列化配置
        let app_config: ApplicationConfig = config_source.try_deserialize()?;

        app_config
            .validate()
            .map_err(|err| ConfigError::Message(format!("配置驗證失敗: {}", err)))?;
        debug!("配置驗證通過");

        Ok(app_config)
    }
}
