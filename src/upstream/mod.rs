//! # 上游监控服务模块
//!
//! 对 UptimeRobot 监控列表接口的访问

pub mod client;
pub mod types;

pub use client::UptimeRobotClient;
pub use types::RawResponse;

use async_trait::async_trait;

/// 监控数据来源
///
/// 失败统一表现为 `None`，错误细节已在实现内部记录日志。
#[async_trait]
pub trait MonitorSource: Send + Sync {
    async fn fetch_monitors(&self) -> Option<RawResponse>;
}
