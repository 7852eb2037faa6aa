//! 批次共享状态
//!
//! 所有并发任务之间唯一共享的数据：成功计数只做原子自增，
//! 错误日志只在互斥锁内追加，取消标记只会从 false 变为 true。
//! 进度上报与成功计数在同一把锁内完成，因此上报值严格递增

use crate::models::BatchReport;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 取消令牌
///
/// 克隆后共享同一个标记，只在准入时检查
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// 批次共享状态
#[derive(Debug)]
pub struct BatchState {
    total: usize,
    processed: AtomicUsize,
    progress_lock: Mutex<()>,
    errors: Mutex<Vec<String>>,
}

impl BatchState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            progress_lock: Mutex::new(()),
            errors: Mutex::new(Vec::new()),
        }
    }

    /// 记录一次成功，返回记录后的成功数
    pub fn record_success(&self) -> usize {
        self.processed.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// 记录一次成功并上报记录后的进度
    ///
    /// 计数和上报在同一把锁内，并发完成的任务按计数顺序上报
    pub fn record_success_and_report(&self, report: impl FnOnce(f64)) -> usize {
        let _guard = self
            .progress_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let done = self.record_success();
        report(self.progress(done));
        done
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Acquire)
    }

    /// 当前进度（0.0 ~ 1.0）
    pub fn progress(&self, processed: usize) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        processed as f64 / self.total as f64
    }

    /// 追加一条错误
    pub fn record_error(&self, message: String) {
        self.errors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message);
    }

    /// 生成报告
    pub fn snapshot(&self, cancelled: bool) -> BatchReport {
        let errors = self
            .errors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        BatchReport {
            errors,
            processed: self.processed(),
            total: self.total,
            cancelled,
        }
    }
}
