use std::{path::Path, process::ExitCode, sync::Arc};

use bilidaily_api::BiliClient;
use bilidaily_config::Config;
use bilidaily_models::{
    core::{TaskResult, UserInfo},
    errors::{error_message, SendableError},
};
use bilidaily_scheduler::execute_task;
use bilidaily_tasks::{Login, LoginTask};
use log::{error, info};
use serde::Serialize;

use crate::qr_login::qr_login;

/// Machine readable line printed after every login check.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginReport {
    login_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coins: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vip_status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    login_method: Option<&'static str>,
}

impl LoginReport {
    fn success(user: &UserInfo, login_method: Option<&'static str>) -> Self {
        Self {
            login_status: "success",
            username: Some(user.username.clone()),
            level: Some(user.level),
            coins: Some(user.coins),
            vip_status: Some(user.vip_status),
            login_method,
            ..Self::default()
        }
    }

    fn failed(error: impl Into<String>, login_method: Option<&'static str>) -> Self {
        Self {
            login_status: "failed",
            error: Some(error.into()),
            login_method,
            ..Self::default()
        }
    }

    fn print(&self) -> Result<(), SendableError> {
        println!("USER_INFO: {}", serde_json::to_string(self)?);
        Ok(())
    }
}

pub async fn login(config: &Config, config_path: &Path, qr: bool) -> Result<ExitCode, SendableError> {
    let client = crate::client(config)?;

    let (result, user) = check(&client).await;
    if result.success {
        report_user(user.as_ref(), None)?;
        return Ok(ExitCode::SUCCESS);
    }

    error!("Not logged in: {}", result.message);
    if !qr {
        LoginReport::failed(result.message, None).print()?;
        return Ok(ExitCode::FAILURE);
    }

    info!("Starting QR code login");
    match qr_login(&client, config_path).await {
        Ok(true) => {}
        Ok(false) => {
            LoginReport::failed("QR login failed or was cancelled", Some("qrcode")).print()?;
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            let message = error_message(err.as_ref());
            error!("QR login error: {}", message);
            LoginReport::failed(format!("QR login error: {message}"), Some("qrcode")).print()?;
            return Ok(ExitCode::FAILURE);
        }
    }

    let (result, user) = check(&client).await;
    if !result.success {
        error!("Login verification failed: {}", result.message);
        LoginReport::failed(
            format!("verification after QR login failed: {}", result.message),
            Some("qrcode"),
        )
        .print()?;
        return Ok(ExitCode::FAILURE);
    }

    report_user(user.as_ref(), Some("qrcode"))?;
    Ok(ExitCode::SUCCESS)
}

async fn check(client: &Arc<BiliClient>) -> (TaskResult, Option<UserInfo>) {
    let task = Arc::new(LoginTask::new(client.clone()));
    let result = execute_task(task.clone()).await;
    (result, task.user_info())
}

fn report_user(user: Option<&UserInfo>, login_method: Option<&'static str>) -> Result<(), SendableError> {
    info!("Logged in");
    let Some(user) = user else {
        return Ok(());
    };

    info!("Username: {}", user.username);
    info!("Level: {}", user.level);
    info!("Coins: {}", user.coins);
    info!("VIP: {}", if user.is_vip() { "yes" } else { "no" });
    LoginReport::success(user, login_method).print()
}
