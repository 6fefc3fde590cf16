mod error;
mod loader;
mod model;
mod tasks;

pub use error::ConfigError;
pub use loader::{load_config, update_cookie, write_default_config, DEFAULT_CONFIG_PATH};
pub use model::{
    CoinTaskConfig, Config, GlobalTaskConfig, LogConfig, LogLevel, NetworkConfig,
    NotificationConfig, ShareAndWatchTaskConfig, WatchVideoTaskConfig, WechatWorkConfig,
};
pub use tasks::{OptionalTask, TaskSettings};
