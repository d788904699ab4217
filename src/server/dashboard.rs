//! # 仪表盘服务器
//!
//! Axum HTTP服务器，提供页面和监控数据API

use axum::Router;
use axum::http::{Method, header};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::CachedMonitorSource;
use crate::config::{AppConfig, ServerConfig};
use crate::error::{DashboardError, Result};
use crate::linfo;
use crate::logging::{LogComponent, LogStage};
use crate::upstream::{MonitorSource, UptimeRobotClient};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn MonitorSource>,
}

impl AppState {
    #[must_use]
    pub fn new(source: Arc<dyn MonitorSource>) -> Self {
        Self { source }
    }

    /// 按配置组装：UptimeRobot 客户端外面包一层 TTL 缓存
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let client = UptimeRobotClient::new(config.upstream.clone());
        let source = CachedMonitorSource::new(client, config.cache.ttl());
        Self::new(Arc::new(source))
    }

    #[must_use]
    pub fn source(&self) -> &dyn MonitorSource {
        self.source.as_ref()
    }
}

/// 仪表盘服务器
pub struct DashboardServer {
    config: ServerConfig,
    router: Router,
}

impl DashboardServer {
    #[must_use]
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        let router = Self::create_router(state, &config);
        Self { config, router }
    }

    /// 创建路由器
    fn create_router(state: AppState, config: &ServerConfig) -> Router {
        let app = super::routes::create_routes(state);
        let service_builder = ServiceBuilder::new().layer(TraceLayer::new_for_http());

        if config.enable_cors {
            let cors_layer = CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                .allow_origin(Any);
            app.layer(service_builder.layer(cors_layer))
        } else {
            app.layer(service_builder)
        }
    }

    /// 带全部中间件的路由器，测试中直接驱动
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// 启动服务器，收到 Ctrl-C 后优雅退出
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.config.socket_addr()?;

        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::ServerSetup,
            "server_start",
            &format!("Starting dashboard server on http://{addr}")
        );

        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            DashboardError::server_start_with_source(format!("failed to bind {addr}"), e)
        })?;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DashboardError::server_start_with_source("dashboard server error", e))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        linfo!(
            "system",
            LogStage::Shutdown,
            LogComponent::ServerSetup,
            "shutdown_signal",
            "Received Ctrl-C, shutting down"
        );
    }
}
