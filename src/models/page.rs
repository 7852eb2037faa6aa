use crate::error::PageError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 拆分得到的单页文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    pub path: PathBuf,
    /// 文件名（含扩展名），用于日志和错误信息
    pub file_name: String,
    /// 不含扩展名的文件名
    pub stem: String,
    /// 扩展名（不含点）
    pub extension: String,
    /// 在目录列表中的位置（从 1 开始）
    pub index: usize,
}

impl PageFile {
    pub fn new(path: impl Into<PathBuf>, index: usize) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let stem = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let extension = path
            .extension()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Self {
            path,
            file_name,
            stem,
            extension,
            index,
        }
    }

    /// 所在目录
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// 是否是未拆分的原始文件
    pub fn is_original(&self, base_name: &str) -> bool {
        self.stem == base_name
    }
}

/// 从页面文本中提取的元数据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    /// 原始日期字符串
    pub date: Option<String>,
    /// 姓名（不含称谓）
    pub name: Option<String>,
}

/// 重命名目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget {
    pub new_path: PathBuf,
    pub file_name: String,
    /// 目标路径上当前没有文件
    pub safe: bool,
}

/// 单页处理结果，每个页面恰好产生一个
#[derive(Debug)]
pub enum PageOutcome {
    /// 重命名成功
    Renamed { target: PathBuf },
    /// 原始文件，跳过
    SkippedOriginal,
    /// 处理失败
    Failed(PageError),
}

/// 批次处理报告
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// 按追加顺序排列的错误信息
    pub errors: Vec<String>,
    /// 成功重命名的页面数
    pub processed: usize,
    /// 本批次的页面总数
    pub total: usize,
    /// 是否被用户取消
    pub cancelled: bool,
}

impl BatchReport {
    /// 汇总信息
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "处理完成: 成功 {}/{}，失败 {}",
            self.processed,
            self.total,
            self.errors.len()
        );
        if self.cancelled {
            summary.push_str("（已取消）");
        }
        summary
    }

    /// 用换行连接的错误列表
    pub fn error_text(&self) -> String {
        self.errors.join("\n")
    }
}
