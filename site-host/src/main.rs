//! Feel-Good Productivity 着陆页宿主服务入口

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use site_host::{AppConfig, AppState};

/// 命令行参数（优先级高于配置文件）
#[derive(Debug, Parser)]
#[command(name = "site-host", version, about = "Feel-Good Productivity 着陆页服务")]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 覆盖监听端口
    #[arg(short, long)]
    port: Option<u16>,

    /// 覆盖路由表文件
    #[arg(long)]
    routes: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config);
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(routes) = cli.routes {
        config.routes_path = Some(routes);
    }
    config.validate()?;

    let state = AppState::from_config(config);
    site_host::serve(state).await
}
