use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 指定配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "PAGE_RENAMER_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时处理的页面数量（准入闸门大小）
    pub max_concurrent_pages: usize,
    /// 页面文件扩展名（不含点）
    pub page_extension: String,
    /// 拆分输出目录，未设置时使用输入文件旁的同名目录
    pub output_dir: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 处理报告文件
    pub report_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_pages: 5,
            page_extension: "pdf".to_string(),
            output_dir: None,
            verbose_logging: false,
            report_file: "rename_report.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_pages: std::env::var("MAX_CONCURRENT_PAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_concurrent_pages),
            page_extension: std::env::var("PAGE_EXTENSION").unwrap_or(default.page_extension),
            output_dir: std::env::var("OUTPUT_DIR").ok().or(default.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            report_file: std::env::var("REPORT_FILE").unwrap_or(default.report_file),
        }
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 优先读取 `PAGE_RENAMER_CONFIG` 指定的文件，否则读取环境变量
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_toml_file(path),
            Err(_) => Ok(Self::from_env()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_pages == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.page_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        Ok(())
    }

    /// 去掉前导点的扩展名
    pub fn extension(&self) -> &str {
        self.page_extension.trim_start_matches('.')
    }
}
