//! # Uptime Dashboard
//!
//! UptimeRobot 监控数据的只读缓存与 JSON API

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod server;
pub mod upstream;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{DashboardError, Result};
