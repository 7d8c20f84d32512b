//! 報表模組
//!
//! 將評估結果轉為 Markdown 區塊，再轉成 HTML 寫入發布目錄。

pub mod error;
pub mod markdown;
pub mod writer;

pub use error::{ReportError, ReportResult};
pub use markdown::{render_document, render_outcome, DIVIDER};
pub use writer::{markdown_to_html, ReportWriter};
