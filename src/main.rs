use anyhow::Result;
use doc_quiz::{logger, App, Config};
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().await?;

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    // 可选：启动时直接选择文件
    let initial_file = std::env::args().nth(1).map(PathBuf::from);

    // 初始化并运行应用
    App::initialize(config).await?.run(initial_file).await?;

    Ok(())
}
