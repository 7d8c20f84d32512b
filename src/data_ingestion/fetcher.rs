//! 價格 API 遠端抓取
//!
//! timeseries 端點每次只接受一個物品 id，因此逐一請求；
//! `timeseries_stream` 以惰性串流表示這個序列，呼叫端可自行決定並行方式。

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, FROM, USER_AGENT};
use reqwest::Client;
use serde_json::Value;

use super::error::FetchError;
use crate::config::ApiConfig;

/// 價格資料來源
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// 取得完整物品目錄（原始 JSON 列）
    async fn fetch_mapping(&self) -> Result<Vec<Value>, FetchError>;

    /// 取得單一物品的時間序列原始回應
    async fn fetch_timeseries(&self, item_id: i64) -> Result<Value, FetchError>;
}

/// OSRS wiki 即時價格 API 客戶端
#[derive(Clone)]
pub struct WikiPriceClient {
    client: Client,
    mapping_url: String,
    timeseries_url: String,
    timestep: String,
}

impl WikiPriceClient {
    /// 依配置建立客戶端，User-Agent 與 From 標頭隨每個請求送出
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("User-Agent", &config.user_agent)?);
        headers.insert(FROM, header_value("From", &config.contact)?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            mapping_url: config.mapping_url.clone(),
            timeseries_url: config.timeseries_url.clone(),
            timestep: config.timestep.clone(),
        })
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> Result<Value, FetchError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::InvalidHeader {
        header,
        message: e.to_string(),
    })
}

#[async_trait]
impl PriceSource for WikiPriceClient {
    async fn fetch_mapping(&self) -> Result<Vec<Value>, FetchError> {
        tracing::info!("抓取物品目錄: {}", self.mapping_url);

        match self.get_json(self.client.get(&self.mapping_url)).await? {
            Value::Array(rows) => {
                tracing::debug!("物品目錄共 {} 筆", rows.len());
                Ok(rows)
            }
            other => Err(FetchError::Decode(format!(
                "物品目錄應為陣列，實際為 {}",
                json_kind(&other)
            ))),
        }
    }

    async fn fetch_timeseries(&self, item_id: i64) -> Result<Value, FetchError> {
        tracing::debug!("抓取物品 {} 的時間序列 (timestep={})", item_id, self.timestep);

        let id = item_id.to_string();
        let request = self
            .client
            .get(&self.timeseries_url)
            .query(&[("timestep", self.timestep.as_str()), ("id", id.as_str())]);

        self.get_json(request).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 依序抓取每個物品的時間序列，一次一個請求
pub fn timeseries_stream<'a, S>(
    source: &'a S,
    item_ids: &'a [i64],
) -> impl Stream<Item = (i64, Result<Value, FetchError>)> + 'a
where
    S: PriceSource + ?Sized,
{
    stream::iter(item_ids.iter().copied()).then(move |item_id| async move {
        let result = source.fetch_timeseries(item_id).await;
        (item_id, result)
    })
}
