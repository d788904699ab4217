//! # 规范化后的监控数据结构

use serde::{Serialize, Serializer};

/// 响应时间不可用时的占位值
pub const NOT_AVAILABLE: &str = "N/A";

/// 未知位置时的默认标签
pub const DEFAULT_LOCATION: &str = "Global Monitoring";

/// 监控状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MonitorStatus {
    Paused,
    #[serde(rename = "Not Checked Yet")]
    NotCheckedYet,
    Up,
    #[serde(rename = "Seems Down")]
    SeemsDown,
    Down,
    Unknown,
}

impl MonitorStatus {
    /// 服务商状态码映射：0/1/2/8/9，其他一律为 `Unknown`
    #[must_use]
    pub const fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Paused,
            Some(1) => Self::NotCheckedYet,
            Some(2) => Self::Up,
            Some(8) => Self::SeemsDown,
            Some(9) => Self::Down,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paused => "Paused",
            Self::NotCheckedYet => "Not Checked Yet",
            Self::Up => "Up",
            Self::SeemsDown => "Seems Down",
            Self::Down => "Down",
            Self::Unknown => "Unknown",
        }
    }
}

/// 监控类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MonitorType {
    #[serde(rename = "HTTP")]
    Http,
    Keyword,
    Ping,
    Port,
}

impl MonitorType {
    /// 1/2/3 分别为 HTTP/Keyword/Ping，其余都视为 Port
    #[must_use]
    pub const fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Http,
            Some(2) => Self::Keyword,
            Some(3) => Self::Ping,
            _ => Self::Port,
        }
    }
}

/// 响应时间（毫秒），序列化为整数或 `"N/A"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTime {
    Millis(i64),
    NotAvailable,
}

impl Serialize for ResponseTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Millis(ms) => serializer.serialize_i64(*ms),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// 面向前端的稳定监控记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedMonitor {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub monitor_type: MonitorType,
    pub status: MonitorStatus,
    /// 服务商原始状态码
    pub status_code: Option<i64>,
    pub response_time: ResponseTime,
    pub location: String,
}
