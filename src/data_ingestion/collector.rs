use futures::stream::{Stream, StreamExt};

use super::error::{FetchError, IngestionError, NormalizationError};
use super::fetcher::{timeseries_stream, PriceSource};
use super::normalizer::{CatalogNormalizer, TimeseriesNormalizer};
use super::traits::RecordNormalizer;
use crate::domain_types::{Catalog, TimeseriesRecord};

/// 單一物品正規化後的時間序列
#[derive(Debug, Default)]
pub struct NormalizedSeries {
    pub records: Vec<TimeseriesRecord>,
    pub rejected: Vec<NormalizationError>,
}

/// 單一物品的抓取結果
#[derive(Debug)]
pub struct ItemFetch {
    pub item_id: i64,
    pub outcome: Result<NormalizedSeries, IngestionError>,
}

/// 本次執行抓到的新資料
#[derive(Debug, Default)]
pub struct FreshFetch {
    pub records: Vec<TimeseriesRecord>,
    /// 抓取或整份回應正規化失敗的物品，合併時完全沿用既有歷史
    pub failed_items: Vec<i64>,
    pub fetched_items: usize,
    pub rejected_records: usize,
}

impl FreshFetch {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 惰性的「抓取 → 正規化」串流，每個物品產生一個結果
pub fn normalized_timeseries<'a, S>(
    source: &'a S,
    item_ids: &'a [i64],
) -> impl Stream<Item = ItemFetch> + 'a
where
    S: PriceSource + ?Sized,
{
    timeseries_stream(source, item_ids).map(|(item_id, result)| {
        let outcome = result.map_err(IngestionError::from).and_then(|response| {
            TimeseriesNormalizer::new(item_id)
                .normalize_response(response)
                .map(|(records, rejected)| NormalizedSeries { records, rejected })
                .map_err(IngestionError::from)
        });
        ItemFetch { item_id, outcome }
    })
}

/// 收集所有追蹤物品的新資料；單一物品失敗只記錄警告，不中斷執行
pub async fn collect_fresh_history<S>(source: &S, item_ids: &[i64]) -> FreshFetch
where
    S: PriceSource + ?Sized,
{
    let mut fresh = FreshFetch::default();
    let mut stream = std::pin::pin!(normalized_timeseries(source, item_ids));

    while let Some(fetch) = stream.next().await {
        match fetch.outcome {
            Ok(series) => {
                for reason in &series.rejected {
                    tracing::warn!("拒絕物品 {} 的時間序列紀錄: {}", fetch.item_id, reason);
                }
                tracing::debug!(
                    "物品 {} 取得 {} 筆紀錄，拒絕 {} 筆",
                    fetch.item_id,
                    series.records.len(),
                    series.rejected.len()
                );
                fresh.fetched_items += 1;
                fresh.rejected_records += series.rejected.len();
                fresh.records.extend(series.records);
            }
            Err(e) => {
                tracing::warn!("物品 {} 抓取失敗，本次僅使用既有歷史: {}", fetch.item_id, e);
                fresh.failed_items.push(fetch.item_id);
            }
        }
    }

    tracing::info!(
        "時間序列抓取完成: 成功 {} 個物品，失敗 {} 個，共 {} 筆紀錄",
        fresh.fetched_items,
        fresh.failed_items.len(),
        fresh.records.len()
    );

    fresh
}

/// 抓取並正規化物品目錄，無效條目記錄警告後略過
pub async fn fetch_catalog<S>(source: &S) -> Result<Catalog, FetchError>
where
    S: PriceSource + ?Sized,
{
    let raw = source.fetch_mapping().await?;
    let (entries, rejected) = CatalogNormalizer.normalize_batch(raw);

    for reason in &rejected {
        tracing::warn!("拒絕物品目錄條目: {}", reason);
    }
    tracing::info!("物品目錄: {} 筆有效，{} 筆被拒絕", entries.len(), rejected.len());

    Ok(Catalog::from_entries(entries))
}
