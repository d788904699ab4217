//! # HTTP 服务
//!
//! 仪表盘页面、连接测试与监控列表接口

pub mod dashboard;
pub mod handlers;
pub mod response;
pub mod routes;

pub use dashboard::{AppState, DashboardServer};
pub use response::{ApiError, ConnectionTestResponse, MonitorsResponse};
pub use routes::create_routes;
