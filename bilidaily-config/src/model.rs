use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub cookie: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub global: GlobalTaskConfig,
    pub coin: CoinTaskConfig,
    pub share_and_watch: ShareAndWatchTaskConfig,
    pub watch_video: WatchVideoTaskConfig,
    pub network: NetworkConfig,
    pub log: LogConfig,
    pub notification: NotificationConfig,
}

impl Config {
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn has_cookie(&self) -> bool {
        !self.cookie.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalTaskConfig {
    /// Upper bound, in seconds, of the random wait before the first task.
    pub startup_delay: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoinTaskConfig {
    pub enabled: bool,
    pub delay: u64,
    pub target_coins: u32,
    pub target_level: u32,
    pub stay_coins: u32,
    pub retry_num: u32,
    pub coins_per_video: u32,
    pub select_like: bool,
    pub interval_ms: u64,
}

impl Default for CoinTaskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay: 0,
            target_coins: 5,
            target_level: 6,
            stay_coins: 0,
            retry_num: 4,
            coins_per_video: 1,
            select_like: false,
            interval_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShareAndWatchTaskConfig {
    pub enabled: bool,
    pub delay: u64,
    pub max_watch_seconds: u64,
}

impl Default for ShareAndWatchTaskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay: 0,
            max_watch_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchVideoTaskConfig {
    pub enabled: bool,
    pub delay: u64,
    pub target_count: u32,
    pub max_watch_seconds: u64,
    pub interval_seconds: u64,
}

impl Default for WatchVideoTaskConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            delay: 0,
            target_count: 3,
            max_watch_seconds: 60,
            interval_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Per request timeout in milliseconds.
    pub timeout: u64,
    pub retries: u32,
    /// Upper bound, in milliseconds, of the random wait before each request.
    pub delay: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: 10_000,
            retries: 3,
            delay: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_work: Option<WechatWorkConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WechatWorkConfig {
    #[serde(default)]
    pub enabled: bool,
    pub corpid: String,
    pub corpsecret: String,
    pub agentid: i64,
    #[serde(default = "default_touser")]
    pub touser: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl WechatWorkConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or("https://qyapi.weixin.qq.com")
            .trim_end_matches('/')
    }
}

fn default_touser() -> String {
    "@all".to_string()
}
