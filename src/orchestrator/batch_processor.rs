//! 批量页面处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一个文档从拆分到重命名的完整批次。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、输出启动信息
//! 2. **文档拆分**：委托 `Splitter` 把输入文档拆成单页文件
//! 3. **批量加载**：扫描输出目录，固定本批次的页面列表
//! 4. **并发处理**：委托 `BatchCoordinator` 在准入闸门下处理所有页面
//! 5. **结果汇报**：把汇总和错误列表交给 `Reporter`，并写入报告文件
//!
//! 批次级错误（输入不存在、无法创建目录、拆分失败、无法读取目录）
//! 会在处理任何页面之前中止整个批次

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{
    ExtractorRegistry, PdfSplitter, Reporter, Splitter, TextExtractor, TracingReporter,
};
use crate::models::{load_page_files, BatchReport};
use crate::orchestrator::batch_state::CancelToken;
use crate::orchestrator::coordinator::BatchCoordinator;
use crate::services::ReportWriter;
use crate::utils::logging::{log_pages_loaded, log_startup, print_final_stats};
use crate::workflow::PageFlow;

/// 应用主结构
pub struct App {
    config: Config,
    extractor: Arc<dyn TextExtractor>,
    splitter: Arc<dyn Splitter>,
    reporter: Arc<dyn Reporter>,
    cancel: CancelToken,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;

        log_startup(&config);

        Ok(Self {
            config,
            extractor: Arc::new(ExtractorRegistry::new()),
            splitter: Arc::new(PdfSplitter),
            reporter: Arc::new(TracingReporter),
            cancel: CancelToken::new(),
        })
    }

    /// 替换文本提取器
    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// 替换文档拆分器
    pub fn with_splitter(mut self, splitter: Arc<dyn Splitter>) -> Self {
        self.splitter = splitter;
        self
    }

    /// 替换报告器
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// 用于外部取消（如 Ctrl-C）的令牌
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// 运行应用主逻辑：拆分输入文档，然后重命名所有页面
    pub async fn run(&self, input: &Path) -> AppResult<BatchReport> {
        if !tokio::fs::try_exists(input).await.unwrap_or(false) {
            return Err(AppError::InputNotFound(input.to_path_buf()));
        }

        let base_name = base_name_of(input)?;
        let output_dir = self.output_dir(input, &base_name);

        tokio::fs::create_dir_all(&output_dir)
            .await
            .map_err(|e| AppError::io(&output_dir, e))?;

        self.reporter.report_status("正在拆分文档...");
        self.split(input, &output_dir).await?;

        // 拆分产物的格式由拆分器决定
        let extension = self.splitter.output_extension().trim_start_matches('.');
        if !extension.eq_ignore_ascii_case(self.config.extension()) {
            warn!(
                "⚠️ 配置的页面扩展名 {} 与拆分输出 {} 不一致，按拆分输出扫描",
                self.config.extension(),
                extension
            );
        }

        self.process_pages(&output_dir, &base_name, extension).await
    }

    /// 重命名目录中已拆分好的页面（按配置的扩展名扫描）
    pub async fn process_directory(
        &self,
        directory: &Path,
        base_name: &str,
    ) -> AppResult<BatchReport> {
        self.process_pages(directory, base_name, self.config.extension())
            .await
    }

    async fn process_pages(
        &self,
        directory: &Path,
        base_name: &str,
        extension: &str,
    ) -> AppResult<BatchReport> {
        info!("\n📁 正在扫描页面文件: {}", directory.display());
        let pages = load_page_files(directory, extension).await?;

        if pages.is_empty() {
            warn!("⚠️ 没有找到待处理的页面文件");
            let report = BatchReport::default();
            self.reporter.report_status(&report.summary());
            return Ok(report);
        }

        log_pages_loaded(pages.len(), self.config.max_concurrent_pages);

        let flow = PageFlow::new(Arc::clone(&self.extractor), base_name)
            .with_verbose_logging(self.config.verbose_logging);
        let coordinator = BatchCoordinator::new(
            flow,
            self.config.max_concurrent_pages,
            Arc::clone(&self.reporter),
        );

        let report = coordinator.run(pages, &self.cancel).await;

        self.reporter.report_status(&report.summary());
        self.reporter.report_errors(&report.error_text());

        let report_path = self.report_path(directory);
        ReportWriter::with_path(&report_path)
            .write(base_name, &report)
            .await?;

        print_final_stats(&report, &report_path);

        Ok(report)
    }

    /// 在阻塞线程池中拆分
    async fn split(&self, input: &Path, output_dir: &Path) -> AppResult<Vec<PathBuf>> {
        let splitter = Arc::clone(&self.splitter);
        let input_owned = input.to_path_buf();
        let output_owned = output_dir.to_path_buf();

        let pages = tokio::task::spawn_blocking(move || splitter.split(&input_owned, &output_owned))
            .await
            .map_err(|e| AppError::split(input, e.to_string()))??;

        info!("✓ 拆分完成，共 {} 页", pages.len());
        Ok(pages)
    }

    /// 未配置输出目录时，使用输入文件旁与文档同名的目录
    fn output_dir(&self, input: &Path, base_name: &str) -> PathBuf {
        match &self.config.output_dir {
            Some(dir) => PathBuf::from(dir),
            None => input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(base_name),
        }
    }

    /// 相对路径的报告文件放在页面目录中
    fn report_path(&self, directory: &Path) -> PathBuf {
        let path = PathBuf::from(&self.config.report_file);
        if path.is_absolute() {
            path
        } else {
            directory.join(path)
        }
    }
}

/// 原始文档名（不含扩展名）
pub fn base_name_of(input: &Path) -> AppResult<String> {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::split(input, "无法获取文件名"))
}
