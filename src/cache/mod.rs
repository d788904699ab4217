//! # 缓存模块
//!
//! 进程内 TTL 缓存，以及套在上游客户端外面的缓存数据来源

pub mod source;
pub mod ttl_cache;

pub use source::{CachedMonitorSource, MONITORS_CACHE_KEY};
pub use ttl_cache::{CacheStats, Clock, ManualClock, SystemClock, TtlCache};
