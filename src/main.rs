use anyhow::{Context, Result};
use page_renamer::utils::logging;
use page_renamer::{App, Config};
use std::path::PathBuf;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let input = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("用法: page_renamer <输入文档>")?;

    let app = App::initialize(config)?;

    // Ctrl-C 只停止准入，进行中的页面会处理完
    let cancel = app.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⏹️ 收到中断信号，正在停止...");
            cancel.cancel();
        }
    });

    let report = app.run(&input).await?;

    if !report.errors.is_empty() {
        std::process::exit(2);
    }

    Ok(())
}
