use std::{process::ExitCode, sync::Arc};

use bilidaily_config::Config;
use bilidaily_models::{core::SchedulerResult, errors::SendableError};
use bilidaily_notify::WeComNotifier;
use bilidaily_scheduler::TaskScheduler;
use bilidaily_tasks::BiliTaskFactory;
use bilidaily_utilities::memory::LogBuffer;
use log::info;

pub async fn run(config: Config, logs: LogBuffer, dry_run: bool) -> Result<ExitCode, SendableError> {
    let config = Arc::new(config);
    let client = crate::client(&config)?;
    let factory = Arc::new(BiliTaskFactory::new(client, config.clone()));
    let notifier = Arc::new(WeComNotifier::new(
        config.notification.wechat_work.clone(),
        &config.network,
        logs,
    )?);
    let scheduler = TaskScheduler::new(config.clone(), factory, notifier);

    if !scheduler.can_execute_tasks() {
        return Ok(ExitCode::FAILURE);
    }

    if dry_run {
        let tasks: Vec<&str> = config.enabled_tasks().map(|task| task.display_name()).collect();
        info!("Dry run, would execute: login check, {}", tasks.join(", "));
        return Ok(ExitCode::SUCCESS);
    }

    let result = scheduler.execute_daily_tasks().await;
    summarize(&result);
    Ok(ExitCode::from(result.exit_code()))
}

fn summarize(result: &SchedulerResult) {
    info!("--- Summary ---");
    if let Some(user) = &result.user_info {
        info!("Account: {} (Lv{})", user.username, user.level);
    }
    for task in &result.results {
        let mark = if task.success { "ok" } else { "failed" };
        info!("{:<22} {:<6} {}", task.name, mark, task.message);
    }
    info!(
        "{} in {:.1}s",
        result.message,
        result.total_time.as_secs_f64()
    );
}
