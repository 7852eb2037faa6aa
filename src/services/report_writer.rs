//! 报告写入服务 - 业务能力层
//!
//! 只负责"把批次报告写到文件"能力，不关心流程

use crate::error::{AppError, AppResult};
use crate::models::BatchReport;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 报告写入服务
///
/// 扩展名为 `.json` 时写 JSON，否则写带时间戳的文本报告
pub struct ReportWriter {
    report_path: PathBuf,
}

impl ReportWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.report_path
    }

    /// 写入报告
    ///
    /// # 参数
    /// - `document`: 原始文档名（用于报告标题）
    /// - `report`: 批次报告
    pub async fn write(&self, document: &str, report: &BatchReport) -> AppResult<()> {
        debug!(
            "写入报告: {} | 错误 {} 条",
            self.report_path.display(),
            report.errors.len()
        );

        let is_json = self
            .report_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let content = if is_json {
            serde_json::to_string_pretty(report).map_err(|e| AppError::Report(e.to_string()))?
        } else {
            render_text(document, report)
        };

        tokio::fs::write(&self.report_path, content)
            .await
            .map_err(|e| AppError::io(&self.report_path, e))
    }
}

fn render_text(document: &str, report: &BatchReport) -> String {
    let mut out = format!(
        "{}\n页面重命名报告 - {}\n文档: {}\n{}\n\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        document,
        "=".repeat(60),
        report.summary()
    );

    if !report.errors.is_empty() {
        out.push_str("\n需要人工处理的页面:\n");
        for line in &report.errors {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}
