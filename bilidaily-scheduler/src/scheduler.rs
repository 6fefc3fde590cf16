use std::sync::Arc;

use bilidaily_config::{Config, OptionalTask};
use bilidaily_models::{
    core::{SchedulerResult, TaskResult, UserInfo},
    errors::{error_message, SendableError},
};
use bilidaily_notify::Notifier;
use bilidaily_tasks::TaskFactory;
use bilidaily_utilities::delay::random_delay_seconds;
use log::{debug, error, info, warn};
use tokio::time::Instant;

use crate::executor::{execute_task, join_error_message};

/// Title of the summary notification sent after every completed run.
pub const NOTIFICATION_TITLE: &str = "BiliDaily";

/// Runs the daily pipeline: login, then each enabled optional task in order,
/// then one notification.
pub struct TaskScheduler {
    config: Arc<Config>,
    factory: Arc<dyn TaskFactory>,
    notifier: Arc<dyn Notifier>,
}

#[derive(Default)]
struct Progress {
    results: Vec<TaskResult>,
    user_info: Option<UserInfo>,
}

enum Outcome {
    Completed,
    LoginFailed(String),
}

impl TaskScheduler {
    pub fn new(
        config: Arc<Config>,
        factory: Arc<dyn TaskFactory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            factory,
            notifier,
        }
    }

    /// Pre-flight guard; a `true` here says nothing about whether the run succeeds.
    pub fn can_execute_tasks(&self) -> bool {
        if !self.config.has_cookie() {
            error!("No cookie configured, run `bilidaily qr-login` or set `cookie` in the config file");
            return false;
        }

        if self.config.enabled_tasks().next().is_none() {
            warn!("Every optional task is disabled, nothing to run");
            return false;
        }

        true
    }

    pub async fn execute_daily_tasks(&self) -> SchedulerResult {
        let started = Instant::now();
        let mut progress = Progress::default();

        let (success, message) = match self.run(&mut progress).await {
            Ok(Outcome::Completed) => aggregate(&progress.results),
            Ok(Outcome::LoginFailed(message)) => {
                error!("Login failed, aborting run: {}", message);
                (false, message)
            }
            Err(err) => {
                let message = error_message(err.as_ref());
                error!("Run aborted: {}", message);
                (false, message)
            }
        };

        let total_time = started.elapsed();
        info!(
            "Run finished in {:.1}s: {}",
            total_time.as_secs_f64(),
            message
        );

        SchedulerResult {
            success,
            message,
            results: progress.results,
            user_info: progress.user_info,
            total_time,
        }
    }

    async fn run(&self, progress: &mut Progress) -> Result<Outcome, SendableError> {
        let waited = random_delay_seconds(self.config.global.startup_delay).await;
        if !waited.is_zero() {
            info!("Startup delay {:.1}s", waited.as_secs_f64());
        }

        let login = self.factory.login()?;
        let result = execute_task(login.clone()).await;
        log_result(&result);
        let logged_in = result.success;
        let login_message = result.message.clone();
        progress.results.push(result);

        if !logged_in {
            return Ok(Outcome::LoginFailed(login_message));
        }
        progress.user_info = login.user_info();

        for task in OptionalTask::ORDER {
            let settings = self.config.task_settings(task);
            if !settings.enabled {
                debug!("Skipping {}, disabled", task.display_name());
                continue;
            }

            let waited = random_delay_seconds(settings.delay_seconds).await;
            if !waited.is_zero() {
                info!(
                    "Waited {:.1}s before {}",
                    waited.as_secs_f64(),
                    task.display_name()
                );
            }

            let runnable = self.factory.optional(task, progress.user_info.as_ref())?;
            let result = execute_task(runnable).await;
            log_result(&result);
            progress.results.push(result);
        }

        self.send_notification().await;
        Ok(Outcome::Completed)
    }

    async fn send_notification(&self) {
        let notifier = self.notifier.clone();
        let handle = tokio::spawn(async move { notifier.notify(NOTIFICATION_TITLE).await });

        match handle.await {
            Ok(Ok(true)) => debug!("Notification delivered"),
            Ok(Ok(false)) => debug!("No notification channel enabled"),
            Ok(Err(err)) => warn!("Notification failed: {}", err),
            Err(err) => warn!("Notification panicked: {}", join_error_message(err)),
        }
    }
}

fn aggregate(results: &[TaskResult]) -> (bool, String) {
    let succeeded = results.iter().filter(|result| result.success).count();
    (
        succeeded > 0,
        format!("{}/{} tasks succeeded", succeeded, results.len()),
    )
}

fn log_result(result: &TaskResult) {
    if result.success {
        info!("[ok] {}: {}", result.name, result.message);
    } else {
        warn!("[failed] {}: {}", result.name, result.message);
    }
}
