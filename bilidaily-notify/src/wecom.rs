use std::time::Duration;

use async_trait::async_trait;
use bilidaily_config::{NetworkConfig, WechatWorkConfig};
use bilidaily_utilities::memory::LogBuffer;
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;

use crate::{Notifier, NotifyError};

const EMPTY_BODY: &str = "no log output";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    errcode: i64,
    #[serde(default)]
    errmsg: String,
    #[serde(default)]
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// WeChat Work application message sender; the body is the run's captured log.
pub struct WeComNotifier {
    config: Option<WechatWorkConfig>,
    client: reqwest::Client,
    logs: LogBuffer,
}

impl WeComNotifier {
    /// Every request is bounded by `network.timeout`.
    pub fn new(
        config: Option<WechatWorkConfig>,
        network: &NetworkConfig,
        logs: LogBuffer,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(network.timeout))
            .build()?;
        Ok(Self {
            config,
            client,
            logs,
        })
    }

    fn compose(&self, title: &str) -> String {
        let body = self.logs.contents();
        if body.is_empty() {
            format!("{title}\n{EMPTY_BODY}")
        } else {
            format!("{title}\n{body}")
        }
    }

    async fn access_token(&self, config: &WechatWorkConfig) -> Result<String, NotifyError> {
        let url = format!("{}/cgi-bin/gettoken", config.base_url());
        let response: TokenResponse = self
            .client
            .get(url)
            .query(&[("corpid", &config.corpid), ("corpsecret", &config.corpsecret)])
            .send()
            .await?
            .json()
            .await?;

        if response.errcode != 0 {
            return Err(NotifyError::Service {
                stage: "gettoken",
                errcode: response.errcode,
                errmsg: response.errmsg,
            });
        }
        Ok(response.access_token)
    }
}

#[async_trait]
impl Notifier for WeComNotifier {
    async fn notify(&self, title: &str) -> Result<bool, NotifyError> {
        let config = match &self.config {
            Some(config) if config.enabled => config,
            _ => {
                debug!("WeChat Work notification disabled");
                return Ok(false);
            }
        };

        let token = self.access_token(config).await?;
        let url = format!("{}/cgi-bin/message/send", config.base_url());
        let payload = json!({
            "touser": config.touser,
            "msgtype": "text",
            "agentid": config.agentid,
            "text": { "content": self.compose(title) },
        });

        let response: SendResponse = self
            .client
            .post(url)
            .query(&[("access_token", token)])
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;

        if response.errcode != 0 {
            return Err(NotifyError::Service {
                stage: "message/send",
                errcode: response.errcode,
                errmsg: response.errmsg,
            });
        }

        info!("WeChat Work notification sent");
        Ok(true)
    }
}
