//! # HTTP 接口测试
//!
//! 直接驱动完整路由（含中间件），上游用替身或 wiremock

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;
use uptime_dashboard::config::{AppConfig, ServerConfig, UpstreamConfig};
use uptime_dashboard::server::{AppState, DashboardServer};
use uptime_dashboard::upstream::{MonitorSource, RawResponse};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 固定返回同一结果的上游替身
struct StubSource {
    response: Option<RawResponse>,
    calls: AtomicUsize,
}

impl StubSource {
    fn returning(response: Option<Value>) -> Arc<Self> {
        Arc::new(Self {
            response: response.map(RawResponse::new),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl MonitorSource for StubSource {
    async fn fetch_monitors(&self) -> Option<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

struct PanickingSource;

#[async_trait]
impl MonitorSource for PanickingSource {
    async fn fetch_monitors(&self) -> Option<RawResponse> {
        panic!("upstream exploded")
    }
}

fn router_with(source: Arc<dyn MonitorSource>) -> Router {
    DashboardServer::new(ServerConfig::default(), AppState::new(source)).into_router()
}

async fn get(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn sample_body() -> Value {
    json!({
        "stat": "ok",
        "monitors": [
            {
                "id": 101,
                "friendly_name": "Website",
                "url": "https://example.com",
                "type": 1,
                "status": 2,
                "response_times": [{"value": 95}],
                "monitor_server_location": "Frankfurt"
            },
            {
                "id": 102,
                "friendly_name": "Mail",
                "url": "",
                "host": "mail.example.com",
                "type": 4,
                "status": 9,
                "average_response_time": 0
            },
            {"friendly_name": "broken", "type": 1}
        ]
    })
}

#[tokio::test]
async fn test_index_serves_dashboard_page() {
    let (status, headers, body) = get(router_with(StubSource::returning(None)), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(String::from_utf8(body).unwrap().contains("/api/monitors"));
}

#[tokio::test]
async fn test_monitors_success_shape() {
    let source = StubSource::returning(Some(sample_body()));
    let (status, body) = get_json(router_with(source.clone()), "/api/monitors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(
        body["monitors"],
        json!([
            {
                "id": 101,
                "name": "Website",
                "url": "https://example.com",
                "type": "HTTP",
                "status": "Up",
                "status_code": 2,
                "response_time": 95,
                "location": "Frankfurt"
            },
            {
                "id": 102,
                "name": "Mail",
                "url": "mail.example.com",
                "type": "Port",
                "status": "Down",
                "status_code": 9,
                "response_time": "N/A",
                "location": "Global Monitoring"
            }
        ])
    );
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_monitors_fetch_failure() {
    let (status, body) =
        get_json(router_with(StubSource::returning(None)), "/api/monitors").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "error": "Failed to fetch monitors from UptimeRobot API. The API request timed out. Please try again in a moment.",
            "cached": false
        })
    );
    assert!(body.get("monitors").is_none());
}

#[tokio::test]
async fn test_monitors_without_array_is_empty_list() {
    let source = StubSource::returning(Some(json!({"stat": "ok"})));
    let (status, body) = get_json(router_with(source), "/api/monitors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monitors"], json!([]));
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_monitors_internal_failure() {
    let (status, body) = get_json(router_with(Arc::new(PanickingSource)), "/api/monitors").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Internal server error: "));
    assert!(error.contains("upstream exploded"));
}

#[tokio::test]
async fn test_connection_test_success() {
    let source = StubSource::returning(Some(sample_body()));
    let (status, body) = get_json(router_with(source), "/api/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "monitors_count": 3,
            "api_response": "ok",
            "message": "Successfully connected to UptimeRobot API"
        })
    );
}

#[tokio::test]
async fn test_connection_test_failure() {
    let (status, body) = get_json(router_with(StubSource::returning(None)), "/api/test").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"status": "error", "message": "Failed to connect to UptimeRobot API"})
    );
}

#[tokio::test]
async fn test_connection_test_internal_failure() {
    let (status, body) = get_json(router_with(Arc::new(PanickingSource)), "/api/test").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "upstream exploded");
}

#[tokio::test]
async fn test_cors_header_on_api_responses() {
    let router = router_with(StubSource::returning(Some(sample_body())));
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/test")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_endpoints_share_one_cached_upstream_call() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&upstream)
        .await;

    let config = AppConfig {
        upstream: UpstreamConfig {
            api_url: format!("{}/v3/monitors", upstream.uri()),
            api_key: "test-key".to_string(),
            timeout_seconds: 5,
            max_attempts: 1,
            retry_delay_ms: 10,
        },
        ..AppConfig::default()
    };
    let router =
        DashboardServer::new(config.server.clone(), AppState::from_config(&config)).into_router();

    let (status, first) = get_json(router.clone(), "/api/monitors").await;
    assert_eq!(status, StatusCode::OK);
    let (status, test) = get_json(router.clone(), "/api/test").await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = get_json(router, "/api/monitors").await;

    assert_eq!(test["monitors_count"], 3);
    assert_eq!(first["monitors"], second["monitors"]);
}

#[tokio::test]
async fn test_failed_upstream_is_not_cached() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "fail"})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&upstream)
        .await;

    let config = AppConfig {
        upstream: UpstreamConfig {
            api_url: upstream.uri(),
            api_key: "test-key".to_string(),
            timeout_seconds: 5,
            max_attempts: 3,
            retry_delay_ms: 10,
        },
        ..AppConfig::default()
    };
    let router =
        DashboardServer::new(config.server.clone(), AppState::from_config(&config)).into_router();

    let (status, _) = get_json(router.clone(), "/api/monitors").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = get_json(router, "/api/monitors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}
