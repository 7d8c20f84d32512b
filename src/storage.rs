pub mod error;
pub mod history_store;

// 匯出歷史存放與合併規則
pub use error::{StorageError, StorageResult};
pub use history_store::{merge, HistoryStore};
