use pulldown_cmark::{html, Options, Parser};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ReportError, ReportResult};
use super::markdown::render_document;
use crate::config::ReportConfig;
use crate::strategy::EvaluationOutcome;

/// Markdown 轉 HTML 片段
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut output = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut output, parser);
    output
}

/// 報表寫入器，負責輸出目錄與檔案
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.output_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 渲染並覆寫報表檔案，必要時建立輸出目錄
    pub fn write(&self, outcomes: &[EvaluationOutcome]) -> ReportResult<()> {
        let html = markdown_to_html(&render_document(outcomes));

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, html).map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!("報表已寫入 {}（{} 個區塊）", self.path.display(), outcomes.len());
        Ok(())
    }
}
