// time_utils.rs
//
// 時間桶相關的轉換函數。價格 API 以 unix 秒表示每個桶的起點，
// 歷史檔案則另存毫秒精度的 datetime 與小時標籤。

use chrono::{DateTime, Utc};

/// 小時桶標籤格式（UTC）
pub const HOUR_BUCKET_FORMAT: &str = "%Y-%m-%d %H";

/// 將 unix 秒轉換為 DateTime<Utc>，超出 chrono 範圍時回傳 None
pub fn timestamp_secs_to_datetime(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// 將 DateTime<Utc> 轉換為毫秒時間戳
pub fn datetime_to_timestamp_ms(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// 產生 "YYYY-MM-DD HH" 形式的小時桶標籤
pub fn hour_bucket_label(dt: &DateTime<Utc>) -> String {
    dt.format(HOUR_BUCKET_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_datetime() {
        let dt = timestamp_secs_to_datetime(1_700_000_000).unwrap();
        assert_eq!(datetime_to_timestamp_ms(&dt), 1_700_000_000_000);
        assert!(timestamp_secs_to_datetime(i64::MAX).is_none());
    }

    #[test]
    fn test_hour_bucket_label_is_utc() {
        // 2023-11-14 22:13:20 UTC
        let dt = timestamp_secs_to_datetime(1_700_000_000).unwrap();
        assert_eq!(hour_bucket_label(&dt), "2023-11-14 22");

        let epoch = timestamp_secs_to_datetime(0).unwrap();
        assert_eq!(hour_bucket_label(&epoch), "1970-01-01 00");
    }
}
