use std::sync::Arc;

use async_trait::async_trait;
use bilidaily_api::{BiliClient, ResponseExt};
use bilidaily_models::{
    core::{TaskResult, TaskType, UserInfo},
    errors::{error_message, SendableError},
};
use log::{error, info};
use parking_lot::RwLock;

use crate::{Login, Task};

pub struct LoginTask {
    client: Arc<BiliClient>,
    user_info: RwLock<Option<UserInfo>>,
}

impl LoginTask {
    pub fn new(client: Arc<BiliClient>) -> Self {
        Self {
            client,
            user_info: RwLock::new(None),
        }
    }

    async fn fetch_user(&self) -> Result<UserInfo, SendableError> {
        let nav = self
            .client
            .nav()
            .await?
            .into_data("nav")
            .map_err(|err| SendableError::from(format!("failed to fetch user info: {err}")))?;
        if !nav.is_login {
            return Err(SendableError::from("not logged in, check the cookie"));
        }

        let balance = self
            .client
            .coin_balance()
            .await?
            .into_data("getCoin")
            .map_err(|err| SendableError::from(format!("failed to fetch coin balance: {err}")))?;

        Ok(UserInfo {
            uid: nav.mid.to_string(),
            username: nav.uname,
            level: nav.level_info.current_level,
            coins: balance.money.or(nav.money).unwrap_or_default(),
            vip_type: nav.vip_type,
            vip_status: nav.vip_status,
            is_login: true,
        })
    }
}

#[async_trait]
impl Task for LoginTask {
    fn task_type(&self) -> TaskType {
        TaskType::Login
    }

    fn name(&self) -> &str {
        "login check"
    }

    async fn execute(&self) -> Result<TaskResult, SendableError> {
        info!("──── login ────");
        match self.fetch_user().await {
            Ok(user) => {
                info!(
                    "Logged in as {} (Lv.{}), coins: {}",
                    user.username, user.level, user.coins
                );
                let message = format!("logged in as {}", user.username);
                *self.user_info.write() = Some(user);
                Ok(TaskResult::success(self.task_type(), self.name(), message))
            }
            Err(err) => {
                let message = error_message(err.as_ref());
                error!("Login check failed: {}", message);
                *self.user_info.write() = None;
                Ok(TaskResult::failure(self.task_type(), self.name(), message))
            }
        }
    }
}

impl Login for LoginTask {
    fn user_info(&self) -> Option<UserInfo> {
        self.user_info.read().clone()
    }
}
