//! 批次协调器 - 编排层
//!
//! ## 职责
//!
//! 1. **准入控制**：使用 Semaphore 限制同时处理的页面数量
//! 2. **取消检查**：每次准入前后检查取消令牌，已准入的任务总会跑完
//! 3. **结果汇总**：成功计数、错误日志、进度上报
//!
//! 单页的具体处理委托给 `PageFlow`

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::infrastructure::Reporter;
use crate::models::{BatchReport, PageFile, PageOutcome};
use crate::orchestrator::batch_state::{BatchState, CancelToken};
use crate::workflow::{PageCtx, PageFlow};

/// 批次协调器
pub struct BatchCoordinator {
    flow: Arc<PageFlow>,
    max_concurrent: usize,
    reporter: Arc<dyn Reporter>,
}

impl BatchCoordinator {
    pub fn new(flow: PageFlow, max_concurrent: usize, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            flow: Arc::new(flow),
            max_concurrent: max_concurrent.max(1),
            reporter,
        }
    }

    /// 处理一个批次的所有页面
    ///
    /// 页面列表在开始时固定，总数即进度分母。取消后不再准入新页面，
    /// 等已准入的页面全部结束后返回
    pub async fn run(&self, pages: Vec<PageFile>, cancel: &CancelToken) -> BatchReport {
        let total = pages.len();
        let state = Arc::new(BatchState::new(total));
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::with_capacity(total);
        let mut stopped = false;

        self.reporter.report_status(&format!(
            "开始处理 {} 个页面（并发 {}）",
            total, self.max_concurrent
        ));

        for page in pages {
            if cancel.is_cancelled() {
                stopped = true;
                break;
            }

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!("准入闸门已关闭: {}", e);
                    break;
                }
            };

            // 等待名额期间可能已被取消
            if cancel.is_cancelled() {
                stopped = true;
                break;
            }

            let flow = Arc::clone(&self.flow);
            let state = Arc::clone(&state);
            let reporter = Arc::clone(&self.reporter);
            let file_name = page.file_name.clone();
            let ctx = PageCtx::new(&page.file_name, page.index, total);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match flow.run(&page, &ctx).await {
                    PageOutcome::Renamed { .. } => {
                        state.record_success_and_report(|fraction| {
                            reporter.report_progress(fraction)
                        });
                    }
                    PageOutcome::SkippedOriginal => {}
                    PageOutcome::Failed(e) => {
                        state.record_error(format!("{}：{}", page.file_name, e));
                    }
                }
            });
            handles.push((file_name, handle));
        }

        if stopped {
            warn!("⚠️ 已取消，不再处理新的页面，等待 {} 个进行中的页面结束", handles.len());
        }

        let (names, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        for (file_name, result) in names.into_iter().zip(join_all(handles).await) {
            if let Err(e) = result {
                error!("[{}] 任务执行失败: {}", file_name, e);
                state.record_error(format!("{}：任务执行失败: {}", file_name, e));
            }
        }

        let report = state.snapshot(stopped);
        info!("{}", report.summary());
        report
    }
}
