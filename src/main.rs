use anyhow::Result;
use quiz_variants::utils::logging;
use quiz_variants::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let stats = App::initialize(config).await?.run().await?;

    if stats.failed > 0 {
        anyhow::bail!("{} 份试卷导出失败", stats.failed);
    }

    Ok(())
}
