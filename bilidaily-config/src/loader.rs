use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde_json::Value;

use crate::{Config, ConfigError};

pub const DEFAULT_CONFIG_PATH: &str = "./config/config.json";

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let data = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let config: Config = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if !(1..=2).contains(&config.coin.coins_per_video) {
        return Err(ConfigError::Invalid {
            field: "coin.coinsPerVideo",
            reason: format!("must be 1 or 2, got {}", config.coin.coins_per_video),
        });
    }

    if config.network.retries > 10 {
        return Err(ConfigError::Invalid {
            field: "network.retries",
            reason: format!("at most 10 retries are allowed, got {}", config.network.retries),
        });
    }

    if let Some(wechat) = &config.notification.wechat_work {
        if wechat.enabled && (wechat.corpid.is_empty() || wechat.corpsecret.is_empty()) {
            return Err(ConfigError::Invalid {
                field: "notification.wechatWork",
                reason: "corpid and corpsecret are required when enabled".into(),
            });
        }
    }

    Ok(())
}

/// Writes the default document to `path`, creating parent directories.
pub fn write_default_config(path: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    write_json(path, &Config::default())?;
    info!("Config file created: {}", path.display());
    Ok(path.to_path_buf())
}

/// Replaces the stored cookie, leaving every other key untouched.
pub fn update_cookie(path: &Path, cookie: &str) -> Result<(), ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let mut document: Value = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match document.as_object_mut() {
        Some(object) => {
            object.insert("cookie".into(), Value::String(cookie.to_string()));
        }
        None => {
            return Err(ConfigError::Invalid {
                field: "cookie",
                reason: "config root is not an object".into(),
            })
        }
    }

    write_json(path, &document)?;
    info!("Cookie saved to {}", path.display());
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let body = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, body).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}
