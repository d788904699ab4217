//! # 应用配置结构定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// UptimeRobot v3 监控列表接口
pub const DEFAULT_API_URL: &str = "https://api.uptimerobot.com/v3/monitors";

/// 未配置 API Key 时使用的占位值，上游会以认证失败拒绝
pub const PLACEHOLDER_API_KEY: &str = "uptimerobot-api-key-not-set";

/// 应用主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 上游监控服务配置
    pub upstream: UpstreamConfig,
    /// 缓存配置
    pub cache: CacheConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub bind_address: String,
    /// 监听端口
    pub port: u16,
    /// 是否启用CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8090,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// 解析监听地址
    pub fn socket_addr(&self) -> crate::error::Result<SocketAddr> {
        let ip = self.bind_address.parse::<IpAddr>().map_err(|e| {
            crate::error::DashboardError::config_with_source(
                format!("invalid bind address '{}'", self.bind_address),
                e,
            )
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// 上游监控服务配置
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// 监控列表接口地址
    pub api_url: String,
    /// Bearer token
    pub api_key: String,
    /// 单次请求超时（秒）
    pub timeout_seconds: u64,
    /// 最大尝试次数（含首次）
    pub max_attempts: u32,
    /// 两次尝试之间的固定间隔（毫秒）
    pub retry_delay_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            timeout_seconds: 90,
            max_attempts: 3,
            retry_delay_ms: 2000,
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// 是否仍在使用占位 API Key
    #[must_use]
    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}

// api_key 不能出现在日志里
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &mask_sensitive_info(&self.api_key))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// 监控列表缓存时间（秒）
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 60 }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> crate::error::Result<()> {
        crate::ensure_config!(self.server.port != 0, "server port must be greater than 0");
        self.server.socket_addr()?;

        crate::ensure_config!(
            !self.upstream.api_url.trim().is_empty(),
            "upstream api_url cannot be empty"
        );
        crate::ensure_config!(
            self.upstream.timeout_seconds > 0,
            "upstream timeout_seconds must be greater than 0"
        );
        crate::ensure_config!(
            self.upstream.max_attempts > 0,
            "upstream max_attempts must be greater than 0"
        );
        crate::ensure_config!(
            self.cache.ttl_seconds > 0,
            "cache ttl_seconds must be greater than 0"
        );

        Ok(())
    }
}

/// 掩码敏感信息，只保留前 4 个字符
#[must_use]
pub fn mask_sensitive_info(value: &str) -> String {
    let prefix: String = value.chars().take(4).collect();
    if value.chars().count() <= 4 {
        "***".to_string()
    } else {
        format!("{prefix}***")
    }
}
