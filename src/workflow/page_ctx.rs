//! 页面处理上下文
//!
//! 封装"我正在处理第几页、哪个文件"这一信息

use std::fmt::Display;

/// 页面处理上下文
#[derive(Debug, Clone)]
pub struct PageCtx {
    /// 页面文件名（含扩展名）
    pub file_name: String,

    /// 页面在目录列表中的序号（从1开始）
    pub index: usize,

    /// 本批次页面总数
    pub total: usize,
}

impl PageCtx {
    pub fn new(file_name: impl Into<String>, index: usize, total: usize) -> Self {
        Self {
            file_name: file_name.into(),
            index,
            total,
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[页面 {}/{} {}]", self.index, self.total, self.file_name)
    }
}
