//! # 上游响应类型

use serde_json::Value;
use std::sync::Arc;

/// 服务商返回的原始响应体
///
/// 内部以 `Arc` 持有，缓存命中时克隆代价很小。
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    body: Arc<Value>,
}

impl RawResponse {
    #[must_use]
    pub fn new(body: Value) -> Self {
        Self {
            body: Arc::new(body),
        }
    }

    /// `stat` 字段
    #[must_use]
    pub fn stat(&self) -> Option<&str> {
        self.body.get("stat").and_then(Value::as_str)
    }

    /// 服务商是否报告成功
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.stat() == Some("ok")
    }

    /// 服务商报告的错误信息，缺失时为 `"Unknown error"`
    #[must_use]
    pub fn error_message(&self) -> String {
        self.body
            .get("error")
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string()
    }

    /// `monitors` 数组；缺失或类型不对时为 `None`
    #[must_use]
    pub fn monitors(&self) -> Option<&[Value]> {
        self.body
            .get("monitors")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// 监控数量，没有 `monitors` 时为 0
    #[must_use]
    pub fn monitor_count(&self) -> usize {
        self.monitors().map_or(0, <[Value]>::len)
    }
}

impl From<Value> for RawResponse {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}
