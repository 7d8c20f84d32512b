use anyhow::{anyhow, Context, Result};
use ge_price_report::config::{self, LogConfig};
use ge_price_report::data_ingestion::WikiPriceClient;
use ge_price_report::pipeline::ReportPipeline;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化配置
    let app_config = config::load_config().context("載入配置失敗")?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    let client = WikiPriceClient::new(&app_config.api).context("建立 HTTP 客戶端失敗")?;
    let pipeline = ReportPipeline::from_config(client, &app_config);

    let summary = pipeline.run().await?;
    info!(
        "完成: 目錄 {} 筆，成功抓取 {} 個物品，失敗 {:?}，報表 {}",
        summary.catalog_entries,
        summary.fetched_items,
        summary.failed_items,
        summary.report_path.display()
    );

    Ok(())
}

/// 安裝全域日誌訂閱者；RUST_LOG 優先於配置中的級別
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_config.level.to_lowercase()));

    let builder = FmtSubscriber::builder().with_env_filter(filter);
    let result = if log_config.format.eq_ignore_ascii_case("compact") {
        tracing::subscriber::set_global_default(builder.compact().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}
