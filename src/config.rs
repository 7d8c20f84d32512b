//! 配置管理模組
//!
//! 本模組負責加載、驗證和管理執行配置。
//! 內建預設值可被 config/default.toml、環境專屬檔案及環境變數逐層覆蓋。
// 宣告子模組
pub mod loader;
pub mod manager;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::{ConfigLoader, Environment};
pub use manager::load_config;
pub use types::*;
pub use validation::{ValidationError, ValidationUtils, Validator};
