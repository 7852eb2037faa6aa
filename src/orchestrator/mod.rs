//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和并发调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量页面处理器
//! - 管理一次运行（拆分、扫描、处理、汇报）
//! - 批次级错误在这里中止整个运行
//!
//! ### `coordinator` - 批次协调器
//! - 准入闸门（Semaphore）
//! - 取消检查
//! - 汇总每个页面的结果
//!
//! ### `batch_state` - 批次共享状态
//! - 成功计数、错误日志、取消令牌
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理一个文档)
//!     ↓
//! coordinator (处理 Vec<PageFile>)
//!     ↓
//! workflow::PageFlow (处理单个 PageFile)
//!     ↓
//! services (能力层：metadata / rename_target / report_writer)
//!     ↓
//! infrastructure (协作者：TextExtractor / Splitter / Reporter)
//! ```

pub mod batch_processor;
pub mod batch_state;
pub mod coordinator;

pub use batch_processor::App;
pub use batch_state::{BatchState, CancelToken};
pub use coordinator::BatchCoordinator;
