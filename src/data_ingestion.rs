//! 資料擷取：遠端抓取與正規化

pub mod collector;
pub mod error;
pub mod fetcher;
pub mod normalizer;
pub mod traits;

pub use collector::{
    collect_fresh_history, fetch_catalog, normalized_timeseries, FreshFetch, ItemFetch,
    NormalizedSeries,
};
pub use error::{FetchError, IngestionError, NormalizationError, NormalizationResult};
pub use fetcher::{timeseries_stream, PriceSource, WikiPriceClient};
pub use normalizer::{CatalogNormalizer, TimeseriesNormalizer};
pub use traits::RecordNormalizer;
