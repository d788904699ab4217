//! # Uptime Dashboard 主程序
//!
//! 启动 HTTP 服务，对外提供仪表盘页面和缓存后的 UptimeRobot 监控数据

use clap::Parser;
use std::path::PathBuf;

use uptime_dashboard::{
    config::ConfigManager,
    lerror, linfo,
    logging::{self, LogComponent, LogStage},
    server::{AppState, DashboardServer},
};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "uptime-dashboard", version, about)]
struct Cli {
    /// TOML 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖监听端口
    #[arg(short, long)]
    port: Option<u16>,

    /// 默认日志级别（`RUST_LOG` 优先）
    #[arg(long)]
    log_level: Option<String>,

    /// 打印日志配置说明后退出
    #[arg(long)]
    log_help: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_help {
        logging::print_logging_help();
        return Ok(());
    }

    logging::init_optimized_logging(cli.log_level.as_ref());

    let mut config = ConfigManager::new(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("配置加载失败: {e}"))?
        .into_config();
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Main,
        "service_starting",
        &format!(
            "Starting UptimeRobot dashboard (cache ttl {}s, upstream {})",
            config.cache.ttl_seconds, config.upstream.api_url
        )
    );

    let state = AppState::from_config(&config);
    let server = DashboardServer::new(config.server, state);

    if let Err(e) = server.serve().await {
        lerror!(
            "system",
            LogStage::Startup,
            LogComponent::Main,
            "service_start_failed",
            &format!("服务启动失败: {e:?}")
        );
        return Err(e.into());
    }

    linfo!(
        "system",
        LogStage::Shutdown,
        LogComponent::Main,
        "service_shutdown",
        "服务正常关闭"
    );
    Ok(())
}
