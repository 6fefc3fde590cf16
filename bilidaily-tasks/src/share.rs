use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bilidaily_api::{BiliClient, Heartbeat};
use bilidaily_config::ShareAndWatchTaskConfig;
use bilidaily_models::{
    core::{TaskResult, TaskType},
    errors::{error_message, SendableError},
    web::VideoInfo,
};
use log::{debug, error, info, warn};
use serde_json::json;

use crate::{candidates, Task};

const MIN_WATCH_SECONDS: u64 = 15;

/// Shares one recommended video and reports a short playback of it.
pub struct ShareAndWatchTask {
    client: Arc<BiliClient>,
    config: ShareAndWatchTaskConfig,
}

impl ShareAndWatchTask {
    pub fn new(client: Arc<BiliClient>, config: ShareAndWatchTaskConfig) -> Self {
        Self { client, config }
    }

    /// Ranking first, then the recommendation feed.
    async fn pick_video(&self) -> Result<VideoInfo, SendableError> {
        match candidates::ranking(&self.client).await {
            Ok(list) => {
                if let Some(video) = candidates::pick_near_top(list, 10) {
                    return Ok(video);
                }
                warn!("Ranking list is empty, falling back to recommendations");
            }
            Err(err) => warn!("Failed to fetch ranking ({}), falling back to recommendations", err),
        }

        let feed = candidates::recommend(&self.client, 10)
            .await
            .map_err(|err| SendableError::from(format!("failed to fetch a recommended video: {err}")))?;
        feed.into_iter()
            .next()
            .ok_or_else(|| SendableError::from("failed to fetch a recommended video: feed is empty"))
    }

    async fn share(&self, video: &VideoInfo) -> bool {
        info!("Sharing video: {}", video.title);
        match self.client.share(video.aid).await {
            Ok(response) if response.is_ok() => {
                info!("Video shared");
                true
            }
            Ok(response) => {
                warn!("Share failed - {}", response.message);
                false
            }
            Err(err) => {
                error!("Share error: {}", err);
                false
            }
        }
    }

    async fn watch(&self, video: &VideoInfo) -> bool {
        info!("Watching video: {}", video.title);
        let watch_seconds = MIN_WATCH_SECONDS.max(video.duration * 3 / 10);

        let start = heartbeat(video, 0);
        if let Err(err) = self.client.heartbeat(&start).await {
            debug!("Start heartbeat failed: {}", err);
        }

        let wait = watch_seconds.min(self.config.max_watch_seconds);
        if wait > 0 {
            tokio::time::sleep(Duration::from_secs(wait)).await;
        }

        match self.client.heartbeat(&heartbeat(video, watch_seconds)).await {
            Ok(response) if response.is_ok() => {
                info!("Playback reported: {}", video.title);
                true
            }
            Ok(response) => {
                warn!("Playback report failed: {} - {}", video.title, response.message);
                false
            }
            Err(err) => {
                error!("Playback report error: {} - {}", video.title, err);
                false
            }
        }
    }

    async fn run(&self) -> Result<TaskResult, SendableError> {
        let video = self.pick_video().await?;
        let share_result = self.share(&video).await;
        let watch_result = self.watch(&video).await;

        let success = share_result && watch_result;
        let message = if success {
            format!("shared and watched: {}", video.title)
        } else {
            format!(
                "share and watch partially failed (share: {}, watch: {})",
                share_result, watch_result
            )
        };
        if success {
            info!("{}", message);
        } else {
            warn!("{}", message);
        }

        Ok(TaskResult::new(self.task_type(), self.name(), success, message).with_data(json!({
            "video": { "aid": video.aid, "bvid": video.bvid, "title": video.title },
            "shareResult": share_result,
            "watchResult": watch_result,
        })))
    }
}

fn heartbeat(video: &VideoInfo, played_seconds: u64) -> Heartbeat {
    Heartbeat {
        aid: video.aid,
        bvid: video.bvid.clone(),
        cid: None,
        played_seconds,
    }
}

#[async_trait]
impl Task for ShareAndWatchTask {
    fn task_type(&self) -> TaskType {
        TaskType::ShareAndWatch
    }

    fn name(&self) -> &str {
        "share and watch task"
    }

    async fn execute(&self) -> Result<TaskResult, SendableError> {
        info!("──── share and watch ────");
        match self.run().await {
            Ok(result) => Ok(result),
            Err(err) => {
                let message = error_message(err.as_ref());
                error!("Share and watch task failed: {}", message);
                Ok(TaskResult::failure(self.task_type(), self.name(), message))
            }
        }
    }
}
