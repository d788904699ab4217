//! # UptimeRobot API客户端
//!
//! 带固定间隔重试的监控列表拉取

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use std::time::Instant;

use super::{MonitorSource, RawResponse};
use crate::config::UpstreamConfig;
use crate::error::{DashboardError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::{ldebug, lerror, linfo, lwarn};

/// UptimeRobot 监控列表客户端
#[derive(Debug, Clone)]
pub struct UptimeRobotClient {
    http_client: Client,
    config: UpstreamConfig,
}

impl UptimeRobotClient {
    /// 使用上游配置创建客户端
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        let http_client = match Client::builder().timeout(config.timeout()).build() {
            Ok(client) => client,
            Err(err) => {
                lerror!(
                    "system",
                    LogStage::Startup,
                    LogComponent::UpstreamClient,
                    "http_client_build_fail",
                    &format!("Failed to build HTTP client, falling back to default client: {err}")
                );
                Client::new()
            }
        };

        Self {
            http_client,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// 拉取监控列表，失败时按配置重试
    ///
    /// 传输层错误（超时、连接失败、非 2xx、响应体解析失败）以固定间隔重试；
    /// 服务商报告的 `stat != "ok"` 直接返回，不重试。
    pub async fn fetch_with_retry(&self) -> Result<RawResponse> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            linfo!(
                "system",
                LogStage::ExternalApi,
                LogComponent::UpstreamClient,
                "fetch_attempt",
                &format!("Fetching monitors from UptimeRobot (attempt {attempt}/{max_attempts})...")
            );
            let start_time = Instant::now();

            match self.fetch_once().await {
                Ok(response) => {
                    linfo!(
                        "system",
                        LogStage::ExternalApi,
                        LogComponent::UpstreamClient,
                        "fetch_success",
                        &format!(
                            "Successfully fetched {} monitors in {:?}",
                            response.monitor_count(),
                            start_time.elapsed()
                        )
                    );
                    return Ok(response);
                }
                Err(e) if !e.is_retryable() => {
                    lerror!(
                        "system",
                        LogStage::ExternalApi,
                        LogComponent::UpstreamClient,
                        "non_retryable_error",
                        &format!("API error: {e}")
                    );
                    return Err(e);
                }
                Err(e) => {
                    if e.is_timeout() {
                        lwarn!(
                            "system",
                            LogStage::ExternalApi,
                            LogComponent::UpstreamClient,
                            "request_timeout",
                            &format!("Request timeout (attempt {attempt}/{max_attempts}): {e}")
                        );
                    } else {
                        lerror!(
                            "system",
                            LogStage::ExternalApi,
                            LogComponent::UpstreamClient,
                            "request_error",
                            &format!("Request error (attempt {attempt}/{max_attempts}): {e}")
                        );
                    }

                    if attempt < max_attempts {
                        let delay = self.config.retry_delay();
                        ldebug!(
                            "system",
                            LogStage::ExternalApi,
                            LogComponent::UpstreamClient,
                            "retrying",
                            &format!("Retrying in {delay:?}")
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        lerror!(
            "system",
            LogStage::ExternalApi,
            LogComponent::UpstreamClient,
            "max_retries_reached",
            &format!("Max retries reached after {max_attempts} attempts")
        );
        Err(last_error.unwrap_or_else(|| DashboardError::network("all fetch attempts failed")))
    }

    /// 单次请求
    async fn fetch_once(&self) -> Result<RawResponse> {
        let response = self
            .http_client
            .get(&self.config.api_url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .send()
            .await
            .map_err(|e| self.classify(e))?
            .error_for_status()
            .map_err(|e| self.classify(e))?;

        let body: Value = response.json().await.map_err(|e| self.classify(e))?;
        let raw = RawResponse::new(body);

        ldebug!(
            "system",
            LogStage::ExternalApi,
            LogComponent::UpstreamClient,
            "api_response_status",
            &format!("API response status: {}", raw.stat().unwrap_or("<missing>"))
        );

        if raw.is_ok() {
            Ok(raw)
        } else {
            Err(DashboardError::provider(raw.error_message()))
        }
    }

    fn classify(&self, err: reqwest::Error) -> DashboardError {
        if err.is_timeout() {
            DashboardError::Timeout {
                message: err.to_string(),
                timeout_seconds: self.config.timeout_seconds,
                source: Some(err.into()),
            }
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl MonitorSource for UptimeRobotClient {
    async fn fetch_monitors(&self) -> Option<RawResponse> {
        self.fetch_with_retry().await.ok()
    }
}
