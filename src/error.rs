use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
///
/// 批次级错误：出现时整个批次在开始处理任何页面之前中止
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 拆分文档失败
    #[error("拆分文档失败 ({path}): {message}")]
    Split { path: PathBuf, message: String },
    /// 输入文件不存在
    #[error("文件不存在: {0}")]
    InputNotFound(PathBuf),
    /// 目录不存在
    #[error("目录不存在: {0}")]
    DirectoryNotFound(PathBuf),
    /// 文件系统错误
    #[error("文件操作失败 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 报告写入失败
    #[error("写入报告失败: {0}")]
    Report(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 并发数无效
    #[error("并发数必须大于 0")]
    ZeroConcurrency,
    /// 页面扩展名为空
    #[error("页面文件扩展名不能为空")]
    EmptyExtension,
}

/// 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 读取文件失败
    #[error("读取文件失败: {0}")]
    Read(#[from] std::io::Error),
    /// PDF 解析失败
    #[error("PDF解析失败: {0}")]
    Pdf(String),
    /// DOCX 解析失败
    #[error("DOCX解析失败: {0}")]
    Docx(String),
    /// 不支持的文件格式
    #[error("不支持的文件格式: {0}")]
    UnsupportedFormat(String),
    /// 提取任务中断
    #[error("提取任务中断: {0}")]
    Interrupted(String),
}

/// 单页处理错误
///
/// 这些错误只影响当前页面，不会中止整个批次
#[derive(Debug, Error)]
pub enum PageError {
    /// 提取文本失败
    #[error("提取文本失败: {0}")]
    ExtractionFailed(#[source] ExtractError),
    /// 未提取到日期
    #[error("未提取到日期")]
    DateNotFound,
    /// 未提取到姓名
    #[error("未提取到姓名")]
    NameNotFound,
    /// 目标文件已存在
    #[error("目标文件已存在: {0}")]
    TargetExists(String),
    /// 重命名失败
    #[error("重命名失败: {0}")]
    RenameFailed(#[source] std::io::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件系统错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建拆分错误
    pub fn split(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AppError::Split {
            path: path.into(),
            message: message.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
