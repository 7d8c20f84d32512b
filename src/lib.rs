// 模組定義
pub mod aggregator;
pub mod config;
pub mod data_ingestion;
pub mod domain_types;
pub mod items;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod strategy;
pub mod utils;
