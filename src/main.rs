use anyhow::Result;
use paper_answer_gen::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置，第一个命令行参数可覆盖试卷目录
    let mut config = Config::from_env();
    if let Some(folder) = std::env::args().nth(1) {
        config.papers_folder = folder;
    }

    // 初始化并运行应用
    let _stats = App::initialize(config)?.run().await?;

    Ok(())
}
