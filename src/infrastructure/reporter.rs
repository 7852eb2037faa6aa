//! 进度报告 - 基础设施层
//!
//! 界面侧的协作者：只接收进度、状态和错误文本，不返回任何结果

use tracing::{info, warn};

/// 报告能力
pub trait Reporter: Send + Sync {
    /// 进度，取值 0.0 ~ 1.0，并发完成时也按递增顺序到达
    fn report_progress(&self, fraction: f64);
    fn report_status(&self, text: &str);
    fn report_errors(&self, text: &str);
}

/// 输出到日志的报告器
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report_progress(&self, fraction: f64) {
        info!("⏳ 进度: {:.1}%", fraction * 100.0);
    }

    fn report_status(&self, text: &str) {
        info!("{}", text);
    }

    fn report_errors(&self, text: &str) {
        if !text.is_empty() {
            warn!("以下页面需要人工处理:\n{}", text);
        }
    }
}

/// 丢弃所有报告
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report_progress(&self, _fraction: f64) {}
    fn report_status(&self, _text: &str) {}
    fn report_errors(&self, _text: &str) {}
}
