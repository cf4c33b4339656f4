use anyhow::Result;
use clap::Parser;

use shuati_bao::app::App;
use shuati_bao::cli::Cli;
use shuati_bao::config::Config;
use shuati_bao::utils::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run(cli.command)?;

    Ok(())
}
