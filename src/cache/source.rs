//! # 带缓存的监控数据来源

use async_trait::async_trait;
use std::time::Duration;

use super::TtlCache;
use crate::upstream::{MonitorSource, RawResponse};

/// 监控列表在缓存中的 key，全局只有这一个槽位
pub const MONITORS_CACHE_KEY: &str = "uptimerobot:monitors";

/// 在任意 `MonitorSource` 前加一层 TTL 缓存
pub struct CachedMonitorSource<S> {
    inner: S,
    cache: TtlCache<RawResponse>,
    ttl: Duration,
}

impl<S: MonitorSource> CachedMonitorSource<S> {
    #[must_use]
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_cache(inner, TtlCache::new(), ttl)
    }

    /// 使用外部构造的缓存（测试中注入手动时钟）
    #[must_use]
    pub const fn with_cache(inner: S, cache: TtlCache<RawResponse>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    #[must_use]
    pub const fn cache(&self) -> &TtlCache<RawResponse> {
        &self.cache
    }

    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: MonitorSource> MonitorSource for CachedMonitorSource<S> {
    async fn fetch_monitors(&self) -> Option<RawResponse> {
        self.cache
            .get_or_fetch(MONITORS_CACHE_KEY, self.ttl, || self.inner.fetch_monitors())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// 按预设顺序返回结果的上游替身
    struct ScriptedSource {
        responses: Mutex<VecDeque<Option<RawResponse>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Option<RawResponse>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MonitorSource for ScriptedSource {
        async fn fetch_monitors(&self) -> Option<RawResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses.lock().unwrap().pop_front().flatten()
        }
    }

    fn ok_response(count: usize) -> RawResponse {
        let monitors: Vec<_> = (0..count).map(|id| json!({"id": id})).collect();
        RawResponse::new(json!({"stat": "ok", "monitors": monitors}))
    }

    #[tokio::test]
    async fn test_success_within_ttl_hits_upstream_once() {
        let source = CachedMonitorSource::new(
            ScriptedSource::new(vec![Some(ok_response(2)), Some(ok_response(5))]),
            Duration::from_secs(60),
        );

        let first = source.fetch_monitors().await.unwrap();
        let second = source.fetch_monitors().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.monitor_count(), 2);
        assert_eq!(source.inner().calls(), 1);
        assert_eq!(source.cache().stats().await.hit_count, 1);
    }

    #[tokio::test]
    async fn test_failure_is_retried_on_next_call() {
        let source = CachedMonitorSource::new(
            ScriptedSource::new(vec![None, Some(ok_response(3))]),
            Duration::from_secs(60),
        );

        assert!(source.fetch_monitors().await.is_none());
        let second = source.fetch_monitors().await.unwrap();

        assert_eq!(second.monitor_count(), 3);
        assert_eq!(source.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_refetches_after_ttl() {
        let clock = Arc::new(ManualClock::new());
        let source = CachedMonitorSource::with_cache(
            ScriptedSource::new(vec![Some(ok_response(1)), Some(ok_response(4))]),
            TtlCache::with_clock(clock.clone()),
            Duration::from_secs(60),
        );

        assert_eq!(source.fetch_monitors().await.unwrap().monitor_count(), 1);
        clock.advance(Duration::from_secs(61));
        assert_eq!(source.fetch_monitors().await.unwrap().monitor_count(), 4);
        assert_eq!(source.inner().calls(), 2);
    }
}
