//! # 监控数据规范化
//!
//! 把服务商的原始记录映射成前端使用的稳定结构。单条记录出错只会被跳过并记录日志，
//! 不影响同批次的其他记录。

pub mod model;
pub mod raw_monitor;

pub use model::{
    DEFAULT_LOCATION, MonitorStatus, MonitorType, NOT_AVAILABLE, NormalizedMonitor, ResponseTime,
};
pub use raw_monitor::RawMonitor;

use serde_json::Value;

use crate::error::Result;
use crate::logging::{LogComponent, LogStage};
use crate::upstream::RawResponse;
use crate::{ldebug, lerror};

/// 规范化整批响应
///
/// 响应缺失或没有 `monitors` 数组时返回空列表。
#[must_use]
pub fn normalize(raw: Option<&RawResponse>) -> Vec<NormalizedMonitor> {
    let Some(records) = raw.and_then(RawResponse::monitors) else {
        lerror!(
            "system",
            LogStage::Normalize,
            LogComponent::Normalizer,
            "no_monitors",
            "No monitors found in API response"
        );
        return Vec::new();
    };

    let monitors: Vec<NormalizedMonitor> = records
        .iter()
        .filter_map(|record| match normalize_monitor(record) {
            Ok(monitor) => Some(monitor),
            Err(e) => {
                lerror!(
                    "system",
                    LogStage::Normalize,
                    LogComponent::Normalizer,
                    "skip_record",
                    &format!(
                        "Error parsing monitor {}: {e}",
                        RawMonitor::id_label(record)
                    )
                );
                None
            }
        })
        .collect();

    ldebug!(
        "system",
        LogStage::Normalize,
        LogComponent::Normalizer,
        "normalized",
        &format!("Normalized {}/{} monitors", monitors.len(), records.len())
    );
    monitors
}

/// 规范化单条记录
pub fn normalize_monitor(record: &Value) -> Result<NormalizedMonitor> {
    let monitor = RawMonitor::from_value(record)?;

    let status_code = monitor.status_code();
    let response_time = monitor
        .latest_response_time()
        .or_else(|| monitor.average_response_time())
        .map_or(ResponseTime::NotAvailable, ResponseTime::Millis);

    Ok(NormalizedMonitor {
        id: monitor.id()?,
        name: monitor.friendly_name()?,
        url: monitor.url(),
        monitor_type: MonitorType::from_code(monitor.type_code()?),
        status: MonitorStatus::from_code(status_code),
        status_code,
        response_time,
        location: monitor.location(),
    })
}
