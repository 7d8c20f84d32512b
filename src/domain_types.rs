pub mod types;
pub mod timeseries;
pub mod catalog;
pub mod aggregate;
pub mod history_frame;

pub use types::{ColumnName, DomainError, Result};
pub use timeseries::TimeseriesRecord;
pub use catalog::{Catalog, CatalogEntry};
pub use aggregate::{AggregateRow, AggregateTable};
pub use history_frame::HistoryFrame;
