//! # Page Renamer
//!
//! 把一个多页文档拆成单页文件，并按页面内容（日期 + 姓名）重命名每一页
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 外部协作者，只暴露能力
//! - `TextExtractor` - 读出单页文件的纯文本（PDF / DOCX / TXT）
//! - `Splitter` - 把文档拆成单页文件
//! - `Reporter` - 接收进度、状态和错误文本
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯能力，不关心流程
//! - `metadata` - 日期 / 姓名提取与日期规范化
//! - `rename_target` - 目标文件名计算与占用检查
//! - `ReportWriter` - 写处理报告
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一页"的完整处理流程
//! - `PageCtx` - 上下文封装（文件名 + 序号）
//! - `PageFlow` - 流程编排（提取 → 识别 → 检查 → 重命名）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 一次运行：拆分、扫描、处理、汇报
//! - `orchestrator/coordinator` - 准入闸门、取消、结果汇总
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ExtractError, PageError};
pub use infrastructure::{Reporter, Splitter, TextExtractor};
pub use models::{BatchReport, PageFile, PageOutcome};
pub use orchestrator::{App, BatchCoordinator, CancelToken};
pub use workflow::{PageCtx, PageFlow};
