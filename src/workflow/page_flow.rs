//! 页面处理流程 - 流程层
//!
//! 核心职责：定义"一页"的完整处理流程
//!
//! 流程顺序：
//! 1. 原始文件 → 跳过
//! 2. 提取文本
//! 3. 提取日期 → 提取姓名（先检查日期）
//! 4. 计算目标路径并检查占用
//! 5. 重命名
//!
//! 每一步失败都直接结束本页，不重试

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{ExtractError, PageError};
use crate::infrastructure::TextExtractor;
use crate::models::{PageFile, PageOutcome};
use crate::services::{metadata, rename_target};
use crate::utils::logging::truncate_text;
use crate::workflow::page_ctx::PageCtx;

/// 页面处理流程
///
/// - 编排单页的提取、识别、重命名
/// - 每次调用恰好产生一个 `PageOutcome`
/// - 不持有任何批次共享状态
pub struct PageFlow {
    extractor: Arc<dyn TextExtractor>,
    base_name: String,
    verbose_logging: bool,
}

impl PageFlow {
    pub fn new(extractor: Arc<dyn TextExtractor>, base_name: impl Into<String>) -> Self {
        Self {
            extractor,
            base_name: base_name.into(),
            verbose_logging: false,
        }
    }

    /// 打印提取到的文本预览
    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    pub async fn run(&self, page: &PageFile, ctx: &PageCtx) -> PageOutcome {
        // ========== 原始文件不重命名 ==========
        if page.is_original(&self.base_name) {
            info!("{} 原始文件，跳过", ctx);
            return PageOutcome::SkippedOriginal;
        }

        match self.process(page, ctx).await {
            Ok(target) => PageOutcome::Renamed { target },
            Err(e) => {
                warn!("{} ❌ {}", ctx, e);
                PageOutcome::Failed(e)
            }
        }
    }

    async fn process(
        &self,
        page: &PageFile,
        ctx: &PageCtx,
    ) -> Result<std::path::PathBuf, PageError> {
        // ========== 提取文本 ==========
        let text = self.extract_text(page).await?;
        if self.verbose_logging {
            self.log_text(ctx, &text);
        }

        // ========== 提取元数据 ==========
        let meta = metadata::extract(&text);
        let date = meta.date.ok_or(PageError::DateNotFound)?;
        let name = meta.name.ok_or(PageError::NameNotFound)?;
        let canonical_date = metadata::canonicalize(&date);
        debug!("{} 日期: {} → {}，姓名: {}", ctx, date, canonical_date, name);

        // ========== 计算目标 ==========
        let target = rename_target::resolve(
            &self.base_name,
            &canonical_date,
            &name,
            &page.extension,
            page.directory(),
        )
        .await;

        if !target.safe {
            return Err(PageError::TargetExists(target.file_name));
        }

        // ========== 重命名 ==========
        tokio::fs::rename(&page.path, &target.new_path)
            .await
            .map_err(PageError::RenameFailed)?;

        info!("{} ✓ 已重命名为 {}", ctx, target.file_name);
        Ok(target.new_path)
    }

    /// 在阻塞线程池中提取文本
    async fn extract_text(&self, page: &PageFile) -> Result<String, PageError> {
        let extractor = Arc::clone(&self.extractor);
        let path = page.path.clone();

        tokio::task::spawn_blocking(move || extractor.extract(&path))
            .await
            .map_err(|e| ExtractError::Interrupted(e.to_string()))
            .and_then(|result| result)
            .map_err(PageError::ExtractionFailed)
    }

    // ========== 日志辅助方法 ==========

    fn log_text(&self, ctx: &PageCtx, text: &str) {
        let preview = truncate_text(text, 80);
        info!("{} 文本: {}", ctx, preview.replace('\n', " "));
    }
}
