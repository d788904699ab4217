//! # 配置管理模块
//!
//! 处理应用配置加载、验证和环境变量覆盖

mod app_config;
mod manager;

pub use app_config::{
    AppConfig, CacheConfig, DEFAULT_API_URL, PLACEHOLDER_API_KEY, ServerConfig, UpstreamConfig,
    mask_sensitive_info,
};
pub use manager::{CONFIG_PATH_ENV, ConfigManager};
