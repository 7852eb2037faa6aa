//! 元数据提取服务 - 业务能力层
//!
//! 只负责"从页面文本中找出日期和姓名"，纯函数，可在任意线程并发调用

use crate::models::ExtractedMetadata;
use regex::Regex;
use std::sync::LazyLock;

/// 4 位年份 + 分隔符 + 1-2 位月份 + 分隔符 + 1-2 位日期 + 可选的"日"
///
/// 只接受 ASCII 数字，`\d` 在 regex 中会匹配全角等 Unicode 数字
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}[-/年][0-9]{1,2}[-/月][0-9]{1,2}日?").expect("valid date regex")
});

/// 紧跟称谓的汉字姓名
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\p{Han}{1,3})(?:先生|小姐)").expect("valid name regex")
});

/// 提取文本中第一个日期字符串
pub fn extract_date(text: &str) -> Option<String> {
    DATE_RE.find(text).map(|m| m.as_str().to_string())
}

/// 提取文本中第一个带称谓的姓名（不含称谓）
pub fn extract_name(text: &str) -> Option<String> {
    NAME_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// 统一日期分隔符为 `-`
///
/// 只做文本替换，不校验日期是否合法
pub fn canonicalize(date: &str) -> String {
    let replaced = date
        .replace(['/', '年', '月'], "-")
        .replace('日', "");
    match replaced.strip_suffix('-') {
        Some(trimmed) => trimmed.to_string(),
        None => replaced,
    }
}

/// 同时提取日期和姓名
pub fn extract(text: &str) -> ExtractedMetadata {
    ExtractedMetadata {
        date: extract_date(text),
        name: extract_name(text),
    }
}
