mod candidates;
pub mod coins;
pub mod login;
pub mod share;
pub mod watch;

use std::sync::Arc;

use async_trait::async_trait;
use bilidaily_api::BiliClient;
use bilidaily_config::{Config, OptionalTask};
use bilidaily_models::{
    core::{TaskResult, TaskType, UserInfo},
    errors::SendableError,
};

pub use coins::CoinTask;
pub use login::LoginTask;
pub use share::ShareAndWatchTask;
pub use watch::WatchVideoTask;

/// One discrete action against the platform.
///
/// Expected failures come back as a failed [`TaskResult`]; an `Err` means the
/// task could not even produce a result and is converted by the caller.
#[async_trait]
pub trait Task: Send + Sync {
    fn task_type(&self) -> TaskType;

    fn name(&self) -> &str;

    async fn execute(&self) -> Result<TaskResult, SendableError>;
}

/// The session check every other task depends on.
pub trait Login: Task {
    /// Snapshot captured by the last successful execution.
    fn user_info(&self) -> Option<UserInfo>;
}

/// Builds task instances for a run.
pub trait TaskFactory: Send + Sync {
    fn login(&self) -> Result<Arc<dyn Login>, SendableError>;

    fn optional(
        &self,
        task: OptionalTask,
        user: Option<&UserInfo>,
    ) -> Result<Arc<dyn Task>, SendableError>;
}

/// Factory wiring the real tasks to a shared platform client.
pub struct BiliTaskFactory {
    client: Arc<BiliClient>,
    config: Arc<Config>,
}

impl BiliTaskFactory {
    pub fn new(client: Arc<BiliClient>, config: Arc<Config>) -> Self {
        Self { client, config }
    }
}

impl TaskFactory for BiliTaskFactory {
    fn login(&self) -> Result<Arc<dyn Login>, SendableError> {
        Ok(Arc::new(LoginTask::new(self.client.clone())))
    }

    fn optional(
        &self,
        task: OptionalTask,
        user: Option<&UserInfo>,
    ) -> Result<Arc<dyn Task>, SendableError> {
        let task: Arc<dyn Task> = match task {
            OptionalTask::Coin => Arc::new(CoinTask::new(
                self.client.clone(),
                self.config.coin.clone(),
                user.cloned(),
            )),
            OptionalTask::ShareAndWatch => Arc::new(ShareAndWatchTask::new(
                self.client.clone(),
                self.config.share_and_watch.clone(),
            )),
            OptionalTask::WatchVideo => Arc::new(WatchVideoTask::new(
                self.client.clone(),
                self.config.watch_video.clone(),
            )),
        };
        Ok(task)
    }
}
