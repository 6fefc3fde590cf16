use std::{any::Any, sync::Arc};

use bilidaily_models::{
    core::TaskResult,
    errors::{error_message, UNKNOWN_ERROR},
};
use bilidaily_tasks::Task;
use log::{debug, error};
use tokio::task::JoinError;

/// Runs one task to completion and always hands back a result.
///
/// An `Err` from the task or a panic inside it becomes a failed
/// [`TaskResult`] carrying the task's name, so the caller's control flow
/// never sees either.
pub async fn execute_task<T>(task: Arc<T>) -> TaskResult
where
    T: Task + ?Sized + 'static,
{
    let task_type = task.task_type();
    let name = task.name().to_string();
    debug!("Running {}", name);

    let runner = task.clone();
    let handle = tokio::spawn(async move { runner.execute().await });

    match handle.await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            let message = error_message(err.as_ref());
            error!("{} failed: {}", name, message);
            TaskResult::failure(task_type, name, message)
        }
        Err(err) => {
            let message = join_error_message(err);
            error!("{} panicked: {}", name, message);
            TaskResult::failure(task_type, name, message)
        }
    }
}

pub(crate) fn join_error_message(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let message = if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        String::new()
    };

    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_become_messages() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new(String::from("bad state"))), "bad state");
        assert_eq!(panic_message(Box::new(42_u8)), UNKNOWN_ERROR);
        assert_eq!(panic_message(Box::new("")), UNKNOWN_ERROR);
    }
}
