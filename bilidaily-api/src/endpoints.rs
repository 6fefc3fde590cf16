use reqwest::Url;

use crate::error::{ApiError, Result};

/// Base URLs of the hosts the client talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub api: String,
    pub account: String,
    pub passport: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api: "https://api.bilibili.com".into(),
            account: "https://account.bilibili.com".into(),
            passport: "https://passport.bilibili.com".into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Host {
    Api,
    Account,
    Passport,
}

impl Endpoints {
    /// Routes every host to the same base, handy for mock servers.
    pub fn uniform(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            api: base.clone(),
            account: base.clone(),
            passport: base,
        }
    }

    pub(crate) fn url(&self, host: Host, path: &str) -> Result<Url> {
        let base = match host {
            Host::Api => &self.api,
            Host::Account => &self.account,
            Host::Passport => &self.passport,
        };
        let trimmed_base = format!("{}/", base.trim_end_matches('/'));
        let trimmed_path = path.trim_start_matches('/');
        Url::parse(&trimmed_base)
            .and_then(|base_url| base_url.join(trimmed_path))
            .map_err(|source| ApiError::InvalidPath {
                base: base.clone(),
                path: trimmed_path.to_string(),
                source,
            })
    }
}
