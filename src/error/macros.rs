//! # 错误处理宏

/// 快速创建配置错误的宏
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::DashboardError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DashboardError::config(format!($fmt, $($arg)*))
    };
}

/// 快速创建记录格式错误的宏
#[macro_export]
macro_rules! malformed_record {
    ($msg:expr) => {
        $crate::error::DashboardError::malformed_record($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DashboardError::malformed_record(format!($fmt, $($arg)*))
    };
}

/// 快速创建内部错误的宏
#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::DashboardError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DashboardError::internal(format!($fmt, $($arg)*))
    };
}

/// 确保条件成立，否则返回配置错误
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::config_error!($msg));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::config_error!($fmt, $($arg)*));
        }
    };
}
