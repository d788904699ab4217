//! # API 响应结构
//!
//! `/api/test` 与 `/api/monitors` 的成功和失败 JSON 格式

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::DashboardError;
use crate::lerror;
use crate::logging::{LogComponent, LogStage};
use crate::normalizer::NormalizedMonitor;
use crate::upstream::RawResponse;

/// 连接测试失败时的提示
pub const CONNECTION_FAILED_MESSAGE: &str = "Failed to connect to UptimeRobot API";

/// 拉取监控失败时的提示
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch monitors from UptimeRobot API. \
     The API request timed out. Please try again in a moment.";

/// # 连接测试响应
#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub status: &'static str,
    pub monitors_count: usize,
    pub api_response: Option<String>,
    pub message: &'static str,
}

impl ConnectionTestResponse {
    #[must_use]
    pub fn success(raw: &RawResponse) -> Self {
        Self {
            status: "success",
            monitors_count: raw.monitor_count(),
            api_response: raw.stat().map(str::to_string),
            message: "Successfully connected to UptimeRobot API",
        }
    }
}

/// # 监控列表响应
#[derive(Debug, Serialize)]
pub struct MonitorsResponse {
    pub monitors: Vec<NormalizedMonitor>,
    pub total: usize,
    /// 服务器本地时间
    pub timestamp: String,
}

impl MonitorsResponse {
    #[must_use]
    pub fn new(monitors: Vec<NormalizedMonitor>) -> Self {
        Self {
            total: monitors.len(),
            monitors,
            timestamp: local_timestamp(),
        }
    }
}

/// 本地时间，ISO-8601，微秒精度，不带时区
#[must_use]
pub fn local_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// # API错误
///
/// 所有变体都以 500 返回，错误信息原样暴露给调用方。
#[derive(Debug)]
pub enum ApiError {
    /// `/api/test` 失败，返回 `{status: "error", message}`
    ConnectionTest(String),
    /// `/api/monitors` 拉取上游失败
    FetchFailed,
    /// `/api/monitors` 的其他内部错误
    Internal(DashboardError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::ConnectionTest(message) => json!({
                "status": "error",
                "message": message,
            }),
            Self::FetchFailed => json!({
                "error": FETCH_FAILED_MESSAGE,
                "cached": false,
            }),
            Self::Internal(error) => {
                let (_, code) = error.to_http_response_parts();
                lerror!(
                    "system",
                    LogStage::Response,
                    LogComponent::Handler,
                    "internal_error",
                    &format!("Error in monitors_api [{code}]: {error}")
                );
                json!({ "error": format!("Internal server error: {error}") })
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_test_success_shape() {
        let raw = RawResponse::new(json!({"stat": "ok", "monitors": [{}, {}, {}]}));
        let body = serde_json::to_value(ConnectionTestResponse::success(&raw)).unwrap();

        assert_eq!(
            body,
            json!({
                "status": "success",
                "monitors_count": 3,
                "api_response": "ok",
                "message": "Successfully connected to UptimeRobot API"
            })
        );
    }

    #[test]
    fn test_monitors_response_counts_entries() {
        let response = MonitorsResponse::new(Vec::new());
        assert_eq!(response.total, 0);
        // 2024-01-01T12:00:00.000000
        assert_eq!(response.timestamp.len(), 26);
        assert!(chrono::NaiveDateTime::parse_from_str(
            &response.timestamp,
            "%Y-%m-%dT%H:%M:%S%.6f"
        )
        .is_ok());
    }
}
