//! # 配置管理器
//!
//! 按 默认值 → TOML 配置文件 → 环境变量 的顺序合成最终配置

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use super::AppConfig;
use crate::error::{Context, DashboardError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::{ldebug, linfo, lwarn};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "UPTIME_DASHBOARD_CONFIG";

/// 环境变量名到配置路径的映射
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("UPTIMEROBOT_API_KEY", "upstream.api_key"),
    ("UPTIMEROBOT_API_URL", "upstream.api_url"),
    ("UPTIME_DASHBOARD_BIND", "server.bind_address"),
    ("UPTIME_DASHBOARD_PORT", "server.port"),
];

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建配置管理器
    ///
    /// `config_path` 为空时读取 `UPTIME_DASHBOARD_CONFIG`，两者都没有则只使用默认值。
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match &path {
            Some(path) => Self::load_config_file(path)?,
            None => AppConfig::default(),
        };

        let overrides = Self::build_env_overrides();
        Self::apply_env_overrides(&mut config, &overrides)?;
        config.validate()?;

        linfo!(
            "system",
            LogStage::Configuration,
            LogComponent::Config,
            "config_loaded",
            &format!(
                "Configuration loaded from {}, {} environment override(s)",
                path.as_ref()
                    .map_or_else(|| "defaults".to_string(), |p| p.display().to_string()),
                overrides.len()
            )
        );
        if config.upstream.uses_placeholder_key() {
            lwarn!(
                "system",
                LogStage::Configuration,
                LogComponent::Config,
                "placeholder_api_key",
                "UPTIMEROBOT_API_KEY is not set, upstream requests will fail authentication"
            );
        }

        Ok(Self {
            config,
            source: path,
        })
    }

    /// 获取当前配置
    #[must_use]
    pub const fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// 配置文件路径（仅使用默认值时为空）
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 消费管理器，取出配置
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// 加载配置文件
    fn load_config_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Err(DashboardError::config(format!(
                "config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        Ok(config)
    }

    /// 构建环境变量覆盖映射（配置路径 -> 值）
    fn build_env_overrides() -> HashMap<&'static str, String> {
        Self::collect_overrides(|var| env::var(var).ok())
    }

    /// 按映射表收集覆盖值，空字符串视为未设置
    fn collect_overrides(lookup: impl Fn(&str) -> Option<String>) -> HashMap<&'static str, String> {
        let overrides: HashMap<_, _> = ENV_OVERRIDES
            .iter()
            .filter_map(|(var, path)| lookup(var).map(|value| (*path, value)))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        ldebug!(
            "system",
            LogStage::Configuration,
            LogComponent::Config,
            "env_overrides",
            &format!("Found {} environment override(s)", overrides.len())
        );
        overrides
    }

    /// 应用环境变量覆盖
    fn apply_env_overrides(
        config: &mut AppConfig,
        overrides: &HashMap<&'static str, String>,
    ) -> Result<()> {
        for (path, value) in overrides {
            Self::apply_override_to_config(config, path, value)?;
        }
        Ok(())
    }

    fn apply_override_to_config(config: &mut AppConfig, path: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = path.split('.').collect();

        match parts.as_slice() {
            ["upstream", "api_key"] => config.upstream.api_key = value.to_string(),
            ["upstream", "api_url"] => config.upstream.api_url = value.to_string(),
            ["server", "bind_address"] => config.server.bind_address = value.to_string(),
            ["server", "port"] => {
                config.server.port = value.parse().map_err(|e| {
                    DashboardError::config_with_source(format!("invalid port number: {value}"), e)
                })?;
            }
            _ => {
                lwarn!(
                    "system",
                    LogStage::Configuration,
                    LogComponent::Config,
                    "unknown_override",
                    &format!("Unknown config path, ignoring override: {path}")
                );
            }
        }

        Ok(())
    }
}
