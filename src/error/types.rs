//! # 错误类型定义

use axum::http::StatusCode;
use thiserror::Error;

/// 应用主要错误类型
#[derive(Debug, Error)]
pub enum DashboardError {
    /// 配置相关错误
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO相关错误
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// 序列化/反序列化错误
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// 网络通信错误（连接失败、响应体读取失败等）
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 请求超时
    #[error("Request timed out after {timeout_seconds}s: {message}")]
    Timeout {
        message: String,
        timeout_seconds: u64,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 上游返回非 2xx 状态码
    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// 监控服务商在响应体中报告的错误（`stat != "ok"`）
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// 单条监控记录无法规范化
    #[error("Malformed monitor record: {message}")]
    MalformedRecord { message: String },

    /// 系统内部错误
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// 附带上下文的错误
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<DashboardError>,
    },

    /// 服务器启动错误
    #[error("Server start error: {message}")]
    ServerStart {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl DashboardError {
    /// 将错误转换为HTTP状态码和错误代码
    #[must_use]
    pub fn to_http_response_parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Context { source, .. } => source.to_http_response_parts(),
            Self::Config { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Self::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            Self::Serialization { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR"),
            Self::Network { .. } => (StatusCode::BAD_GATEWAY, "NETWORK_ERROR"),
            Self::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            Self::UpstreamStatus { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM_STATUS_ERROR"),
            Self::Provider { .. } => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            Self::MalformedRecord { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_RECORD"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::ServerStart { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_START_ERROR"),
        }
    }

    /// 是否值得重试
    ///
    /// 传输层失败（超时、连接、非 2xx、响应体解析）可重试；服务商明确报告的错误不可重试。
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Context { source, .. } => source.is_retryable(),
            Self::Timeout { .. }
            | Self::Network { .. }
            | Self::UpstreamStatus { .. }
            | Self::Serialization { .. } => true,
            _ => false,
        }
    }

    /// 是否为超时错误
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Context { source, .. } => source.is_timeout(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// 创建配置错误
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的配置错误
    pub fn config_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建网络错误
    pub fn network<T: Into<String>>(message: T) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的网络错误
    pub fn network_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建服务商错误
    pub fn provider<T: Into<String>>(message: T) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// 创建记录格式错误
    pub fn malformed_record<T: Into<String>>(message: T) -> Self {
        Self::MalformedRecord {
            message: message.into(),
        }
    }

    /// 创建内部错误
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 创建带来源的服务器启动错误
    pub fn server_start_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::ServerStart {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: "file or socket operation failed".to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("failed to parse TOML", err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: err.into(),
        }
    }
}

// Reqwest错误转换：超时、状态码和响应体解析分别归类，便于重试判断
impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                message: err.to_string(),
                timeout_seconds: 0,
                source: Some(err.into()),
            };
        }
        if let Some(status) = err.status() {
            return Self::UpstreamStatus {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return Self::Serialization {
                message: "failed to decode upstream response body".to_string(),
                source: err.into(),
            };
        }
        Self::network_with_source("HTTP request failed", err)
    }
}
