//! # 原始监控记录视图
//!
//! 服务商的记录字段可能缺失、为 null 或形态不一。这里的访问器对可选字段
//! 返回带默认值的类型化结果，只有 `id` / `friendly_name` / `type` 缺失时报错。

use serde_json::{Map, Value};

use super::model::{DEFAULT_LOCATION, NOT_AVAILABLE};
use crate::error::Result;
use crate::malformed_record;

/// 借用的原始记录
#[derive(Debug, Clone, Copy)]
pub struct RawMonitor<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawMonitor<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(|fields| Self { fields })
            .ok_or_else(|| malformed_record!("record is not a JSON object"))
    }

    /// 日志里用来指代记录的 id，取不到时为 `"unknown"`
    #[must_use]
    pub fn id_label(value: &Value) -> String {
        match value.get("id") {
            None | Some(Value::Null) => "unknown".to_string(),
            Some(id) => display_value(id),
        }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }

    fn required(&self, name: &str) -> Result<&'a Value> {
        self.field(name)
            .ok_or_else(|| malformed_record!("missing field `{}`", name))
    }

    pub fn id(&self) -> Result<i64> {
        let id = self.required("id")?;
        as_exact_int(id).ok_or_else(|| malformed_record!("field `id` is not an integer: {}", id))
    }

    pub fn friendly_name(&self) -> Result<String> {
        self.required("friendly_name").map(display_value)
    }

    /// 类型码；字段必须存在，值可以是任何形态
    pub fn type_code(&self) -> Result<Option<i64>> {
        self.required("type").map(as_exact_int)
    }

    #[must_use]
    pub fn status_code(&self) -> Option<i64> {
        self.field("status").and_then(as_exact_int)
    }

    /// 历史响应时间中最新一条（数组第一项）的值
    #[must_use]
    pub fn latest_response_time(&self) -> Option<i64> {
        self.field("response_times")
            .and_then(Value::as_array)
            .and_then(|history| history.first())
            .and_then(|latest| latest.get("value"))
            .and_then(truncate_number)
    }

    /// 平均响应时间；0 视为没有数据
    #[must_use]
    pub fn average_response_time(&self) -> Option<i64> {
        self.field("average_response_time")
            .filter(|value| is_truthy(value))
            .and_then(truncate_number)
    }

    /// `url` 为空串时退回 `host`，字段缺失为 `"N/A"`
    #[must_use]
    pub fn url(&self) -> String {
        let url = self.string_or_not_available("url");
        if url.is_empty() {
            self.string_or_not_available("host")
        } else {
            url
        }
    }

    /// 监控节点位置
    ///
    /// 依次尝试 `monitor_server_location`、`location`（字符串或含 `country` 的对象）、
    /// 顶层 `country`，都没有时为默认标签。
    #[must_use]
    pub fn location(&self) -> String {
        if let Some(server_location) = self.truthy_field("monitor_server_location") {
            return display_value(server_location);
        }

        if let Some(location) = self.truthy_field("location") {
            return match location {
                Value::Object(object) => match object.get("country").filter(|c| is_truthy(c)) {
                    Some(Value::Object(country)) => country
                        .get("name")
                        .map_or_else(|| "Global".to_string(), display_value),
                    Some(country) => display_value(country),
                    None => location.to_string(),
                },
                other => display_value(other),
            };
        }

        if let Some(country) = self.truthy_field("country") {
            return display_value(country);
        }

        DEFAULT_LOCATION.to_string()
    }

    fn truthy_field(&self, name: &str) -> Option<&'a Value> {
        self.field(name).filter(|value| is_truthy(value))
    }

    fn string_or_not_available(&self, name: &str) -> String {
        match self.field(name) {
            None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
            Some(value) => display_value(value),
        }
    }
}

/// 字符串原样输出，其余值输出 JSON 文本
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 空值、`false`、0、空串、空数组、空对象为假
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// 整数，或小数部分为 0 的浮点数
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn as_exact_int(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.trunc() == *f)
            .map(|f| f as i64)
    })
}

/// 任意数值向零截断为整数
#[allow(clippy::cast_possible_truncation)]
fn truncate_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}
