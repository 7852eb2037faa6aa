/// 日志工具模块
///
/// 提供日志初始化和运行信息输出的辅助函数
use crate::config::Config;
use crate::models::BatchReport;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则为 `info`（详细模式为 `debug`）。重复调用不会报错
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 页面拆分重命名");
    info!("📊 最大并发数: {}", config.max_concurrent_pages);
    info!("📎 页面扩展名: {}", config.extension());
    info!("{}", "=".repeat(60));
}

/// 记录页面加载信息
///
/// # 参数
/// - `total`: 页面总数
/// - `max_concurrent`: 最大并发数
pub fn log_pages_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的页面", total);
    info!("📋 最多同时处理 {} 个页面\n", max_concurrent);
}

/// 打印最终统计信息
pub fn print_final_stats(report: &BatchReport, report_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", report.processed, report.total);
    info!("❌ 失败: {}", report.errors.len());
    if report.cancelled {
        info!("⏹️ 已被取消");
    }
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_path.display());
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
