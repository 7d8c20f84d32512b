//! 基於 Polars 的價格歷史框架

use polars::prelude::*;

use super::timeseries::TimeseriesRecord;
use super::types::{ColumnName, DomainError, Result};
use crate::utils::datetime_to_timestamp_ms;

/// 歷史框架：固定欄位集合的 DataFrame 包裝
///
/// 欄位依序為 id, timestamp, avgHighPrice, avgLowPrice, highPriceVolume,
/// lowPriceVolume, datetime (Datetime[ms]), ymd_h。
#[derive(Debug, Clone)]
pub struct HistoryFrame {
    df: DataFrame,
}

impl HistoryFrame {
    /// 歷史檔案的欄位結構
    pub fn schema() -> Schema {
        let mut schema = Schema::with_capacity(8);
        for name in [
            ColumnName::ITEM_ID,
            ColumnName::TIMESTAMP,
            ColumnName::AVG_HIGH_PRICE,
            ColumnName::AVG_LOW_PRICE,
            ColumnName::HIGH_PRICE_VOLUME,
            ColumnName::LOW_PRICE_VOLUME,
        ] {
            schema.with_column(name.into(), DataType::Int64);
        }
        schema.with_column(
            ColumnName::DATETIME.into(),
            DataType::Datetime(TimeUnit::Milliseconds, None),
        );
        schema.with_column(ColumnName::HOUR_BUCKET.into(), DataType::String);
        schema
    }

    /// 欄位名稱（依固定順序）
    pub fn column_names() -> [&'static str; 8] {
        [
            ColumnName::ITEM_ID,
            ColumnName::TIMESTAMP,
            ColumnName::AVG_HIGH_PRICE,
            ColumnName::AVG_LOW_PRICE,
            ColumnName::HIGH_PRICE_VOLUME,
            ColumnName::LOW_PRICE_VOLUME,
            ColumnName::DATETIME,
            ColumnName::HOUR_BUCKET,
        ]
    }

    /// 空的歷史框架
    pub fn empty() -> Self {
        Self {
            df: DataFrame::empty_with_schema(&Self::schema()),
        }
    }

    /// 由紀錄建立框架，保持輸入順序
    pub fn from_records(records: &[TimeseriesRecord]) -> PolarsResult<Self> {
        let ids: Vec<i64> = records.iter().map(|r| r.item_id).collect();
        let timestamps: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
        let avg_high: Vec<Option<i64>> = records.iter().map(|r| r.avg_high_price).collect();
        let avg_low: Vec<Option<i64>> = records.iter().map(|r| r.avg_low_price).collect();
        let high_volume: Vec<i64> = records.iter().map(|r| r.high_price_volume).collect();
        let low_volume: Vec<i64> = records.iter().map(|r| r.low_price_volume).collect();
        let datetime_ms: Vec<i64> = records
            .iter()
            .map(|r| datetime_to_timestamp_ms(&r.datetime))
            .collect();
        let hour_buckets: Vec<&str> = records.iter().map(|r| r.hour_bucket.as_str()).collect();

        let datetime = Column::new(ColumnName::DATETIME.into(), datetime_ms)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

        let df = DataFrame::new(vec![
            Column::new(ColumnName::ITEM_ID.into(), ids),
            Column::new(ColumnName::TIMESTAMP.into(), timestamps),
            Column::new(ColumnName::AVG_HIGH_PRICE.into(), avg_high),
            Column::new(ColumnName::AVG_LOW_PRICE.into(), avg_low),
            Column::new(ColumnName::HIGH_PRICE_VOLUME.into(), high_volume),
            Column::new(ColumnName::LOW_PRICE_VOLUME.into(), low_volume),
            datetime,
            Column::new(ColumnName::HOUR_BUCKET.into(), hour_buckets),
        ])?;

        Ok(Self { df })
    }

    /// 由任意 DataFrame（例如讀回的 parquet）重建框架
    ///
    /// 只取價格與成交量欄位，datetime 與小時標籤一律重新推導，
    /// 因此儲存格式做過的型別放寬不會影響欄位結構。
    /// 缺欄位或欄位型別錯誤時整體失敗；單列無效時記錄警告並略過該列。
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let rows = Self::rows_from(df)?;

        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for (row, result) in rows.into_iter().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("略過歷史第 {} 列: {}", row, e);
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            tracing::warn!("歷史資料共略過 {} 列無效紀錄，保留 {} 列", skipped, records.len());
        }

        Ok(Self::from_records(&records)?)
    }

    /// 轉換為紀錄，任何一列無效即失敗
    pub fn to_records(&self) -> Result<Vec<TimeseriesRecord>> {
        Self::rows_from(&self.df)?.into_iter().collect()
    }

    /// 逐列轉換；外層錯誤為欄位層級，內層為單列
    fn rows_from(df: &DataFrame) -> Result<Vec<Result<TimeseriesRecord>>> {
        let ids = int_column(df, ColumnName::ITEM_ID)?;
        let timestamps = int_column(df, ColumnName::TIMESTAMP)?;
        let avg_high = int_column(df, ColumnName::AVG_HIGH_PRICE)?;
        let avg_low = int_column(df, ColumnName::AVG_LOW_PRICE)?;
        let high_volume = int_column(df, ColumnName::HIGH_PRICE_VOLUME)?;
        let low_volume = int_column(df, ColumnName::LOW_PRICE_VOLUME)?;

        let required = |chunked: &Int64Chunked, field: &str, row: usize| {
            chunked.get(row).ok_or_else(|| DomainError::MissingRequiredField {
                field: field.to_string(),
                row,
            })
        };

        let record_at = |row: usize| -> Result<TimeseriesRecord> {
            TimeseriesRecord::new(
                required(&ids, ColumnName::ITEM_ID, row)?,
                required(&timestamps, ColumnName::TIMESTAMP, row)?,
                avg_high.get(row),
                avg_low.get(row),
                required(&high_volume, ColumnName::HIGH_PRICE_VOLUME, row)?,
                required(&low_volume, ColumnName::LOW_PRICE_VOLUME, row)?,
            )
        };

        Ok((0..df.height()).map(record_at).collect())
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    /// 包裝已符合欄位結構的 DataFrame（僅供本 crate 的計算結果使用）
    pub(crate) fn from_validated(df: DataFrame) -> Self {
        Self { df }
    }

    /// 依 (id, timestamp) 排序的唯一鍵列表
    pub fn keys(&self) -> PolarsResult<Vec<(i64, i64)>> {
        let ids = int_column(&self.df, ColumnName::ITEM_ID)?;
        let timestamps = int_column(&self.df, ColumnName::TIMESTAMP)?;

        let mut keys: Vec<(i64, i64)> = (&ids)
            .into_iter()
            .zip(&timestamps)
            .filter_map(|(id, ts)| Some((id?, ts?)))
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

/// 讀取整數欄位，必要時轉型為 Int64
fn int_column(df: &DataFrame, name: &str) -> PolarsResult<Int64Chunked> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.clone())
}
