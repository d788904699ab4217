//! # 请求处理器

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use std::any::Any;

use super::response::{
    ApiError, CONNECTION_FAILED_MESSAGE, ConnectionTestResponse, MonitorsResponse,
};
use super::dashboard::AppState;
use crate::logging::{LogComponent, LogStage};
use crate::normalizer::normalize;
use crate::{internal_error, lerror, linfo};

/// 仪表盘页面
const DASHBOARD_HTML: &str = include_str!("../../templates/index.html");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// `GET /api/test`：经过缓存拉取一次，报告连接状态和监控数量
pub async fn test_connection(State(state): State<AppState>) -> Response {
    match state.source().fetch_monitors().await {
        Some(raw) => Json(ConnectionTestResponse::success(&raw)).into_response(),
        None => ApiError::ConnectionTest(CONNECTION_FAILED_MESSAGE.to_string()).into_response(),
    }
}

/// `GET /api/monitors`：经过缓存拉取并规范化
pub async fn list_monitors(
    State(state): State<AppState>,
) -> Result<Json<MonitorsResponse>, ApiError> {
    let Some(raw) = state.source().fetch_monitors().await else {
        lerror!(
            "system",
            LogStage::Response,
            LogComponent::Handler,
            "fetch_failed",
            "Failed to fetch monitors from API"
        );
        return Err(ApiError::FetchFailed);
    };

    linfo!(
        "system",
        LogStage::Response,
        LogComponent::Handler,
        "fetch_success",
        "Successfully fetched monitors data"
    );
    let monitors = normalize(Some(&raw));

    Ok(Json(MonitorsResponse::new(monitors)))
}

/// `/api/test` 处理器 panic 时的响应
pub fn connection_test_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::ConnectionTest(panic_message(panic.as_ref())).into_response()
}

/// `/api/monitors` 处理器 panic 时的响应
pub fn monitors_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal(internal_error!(panic_message(panic.as_ref()))).into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "handler panicked".to_string())
}
