mod error;
mod wecom;

pub use error::NotifyError;
pub use wecom::WeComNotifier;

use async_trait::async_trait;

/// Delivers a run summary to an external channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns `Ok(false)` when the channel is not configured and nothing was sent.
    async fn notify(&self, title: &str) -> Result<bool, NotifyError>;
}

/// Notifier for runs without any configured channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _title: &str) -> Result<bool, NotifyError> {
        Ok(false)
    }
}
