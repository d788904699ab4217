//! # TTL 内存缓存
//!
//! 条目只按时间过期，没有主动淘汰；加载失败（`None`）的结果不会写入缓存。

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::ldebug;
use crate::logging::{LogComponent, LogStage};

/// 时间来源
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// 系统单调时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 手动推进的时钟，用于测试过期逻辑
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// 时钟前进 `duration`
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += duration;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 缓存项
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    const fn new(value: V, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// 缓存统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub total_keys: usize,
    pub hit_count: u64,
    pub miss_count: u64,
}

impl CacheStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

/// 按 key 存放、按 TTL 过期的异步缓存
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl<V: Clone + Send + Sync> TtlCache<V> {
    /// 使用系统时钟创建缓存
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 使用指定时钟创建缓存
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// 读取未过期的值
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            _ => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// 写入值，同时清理已过期的条目
    pub async fn insert(&self, key: &str, value: V, ttl: Duration) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(key.to_string(), CacheEntry::new(value, now + ttl));
    }

    /// 命中则返回缓存值，否则调用 `loader` 并只缓存成功结果
    ///
    /// 加载期间不持有锁；同一 key 的并发未命中会各自调用 `loader`。
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> Option<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Option<V>> + Send,
    {
        if let Some(value) = self.get(key).await {
            ldebug!(
                "system",
                LogStage::Cache,
                LogComponent::Cache,
                "cache_hit",
                &format!("Cache hit for {key}")
            );
            return Some(value);
        }

        ldebug!(
            "system",
            LogStage::Cache,
            LogComponent::Cache,
            "cache_miss",
            &format!("Cache miss for {key}, loading")
        );

        let value = loader().await?;
        self.insert(key, value.clone(), ttl).await;
        Some(value)
    }

    /// 当前统计（条目数包含尚未清理的过期条目）
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            total_keys: self.entries.read().await.len(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }
}

impl<V: Clone + Send + Sync> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
