//! # 配置加载集成测试

use pretty_assertions::assert_eq;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use uptime_dashboard::config::{ConfigManager, DEFAULT_API_URL};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_toml_file() {
    let file = write_config(
        r#"
        [server]
        bind_address = "127.0.0.1"
        port = 9191
        enable_cors = false

        [upstream]
        timeout_seconds = 15
        retry_delay_ms = 500

        [cache]
        ttl_seconds = 120
        "#,
    );

    let manager = ConfigManager::new(Some(file.path())).unwrap();
    let config = manager.get_config();

    assert_eq!(manager.source(), Some(file.path()));
    assert_eq!(config.server.socket_addr().unwrap().to_string(), "127.0.0.1:9191");
    assert!(!config.server.enable_cors);
    assert_eq!(config.upstream.timeout(), Duration::from_secs(15));
    assert_eq!(config.upstream.retry_delay(), Duration::from_millis(500));
    assert_eq!(config.upstream.max_attempts, 3);
    assert_eq!(config.upstream.api_url, DEFAULT_API_URL);
    assert_eq!(config.cache.ttl(), Duration::from_secs(120));
}

#[test]
fn test_invalid_toml_is_rejected() {
    let file = write_config("[server\nport = ");

    let err = ConfigManager::new(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("invalid config file"));
}

#[test]
fn test_invalid_values_fail_validation() {
    let file = write_config("[cache]\nttl_seconds = 0\n");

    let err = ConfigManager::new(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("ttl_seconds"));
}
