//! 文档拆分器 - 基础设施层
//!
//! 把一个多页文档拆成每页一个文件

use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 拆分能力
pub trait Splitter: Send + Sync {
    /// 拆分 `input` 到 `output_dir`，返回生成的文件路径
    fn split(&self, input: &Path, output_dir: &Path) -> AppResult<Vec<PathBuf>>;

    /// 生成的单页文件扩展名（不含点），拆分后按它扫描页面
    fn output_extension(&self) -> &str;
}

/// 单页文件名：`{原文件名}_{序号:03}.{扩展名}`
pub fn page_file_name(base_name: &str, page_number: usize, extension: &str) -> String {
    format!("{}_{:03}.{}", base_name, page_number, extension)
}

/// 使用 lopdf 按页拆分 PDF
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfSplitter;

impl Splitter for PdfSplitter {
    fn split(&self, input: &Path, output_dir: &Path) -> AppResult<Vec<PathBuf>> {
        let base_name = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| AppError::split(input, "无法获取文件名"))?;

        let doc = lopdf::Document::load(input).map_err(|e| AppError::split(input, e.to_string()))?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        if page_numbers.is_empty() {
            return Err(AppError::split(input, "文档没有页面"));
        }

        info!("📄 {} 共 {} 页，开始拆分", input.display(), page_numbers.len());

        let mut outputs = Vec::with_capacity(page_numbers.len());
        for (idx, keep) in page_numbers.iter().enumerate() {
            let mut single = doc.clone();
            let others: Vec<u32> = page_numbers.iter().copied().filter(|n| n != keep).collect();
            single.delete_pages(&others);
            single.prune_objects();

            let out_path =
                output_dir.join(page_file_name(&base_name, idx + 1, self.output_extension()));
            single
                .save(&out_path)
                .map_err(|e| AppError::split(&out_path, e.to_string()))?;

            debug!("已保存 {}", out_path.display());
            outputs.push(out_path);
        }

        Ok(outputs)
    }

    fn output_extension(&self) -> &str {
        "pdf"
    }
}
