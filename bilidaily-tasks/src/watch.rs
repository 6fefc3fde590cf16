use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bilidaily_api::{BiliClient, ClickReport, Heartbeat, ResponseExt};
use bilidaily_config::WatchVideoTaskConfig;
use bilidaily_models::{
    core::{TaskResult, TaskType, WatchResult},
    errors::{error_message, SendableError},
    web::{VideoInfo, VideoPage},
};
use log::{debug, error, info, warn};
use rand::Rng;
use serde_json::json;

use crate::{candidates, Task};

const FALLBACK_DURATION: u64 = 300;
const MAX_HEARTBEAT_STEPS: u64 = 5;

/// Simulates watching several recommended videos with progress heartbeats.
pub struct WatchVideoTask {
    client: Arc<BiliClient>,
    config: WatchVideoTaskConfig,
}

impl WatchVideoTask {
    pub fn new(client: Arc<BiliClient>, config: WatchVideoTaskConfig) -> Self {
        Self { client, config }
    }

    async fn candidates(&self) -> Result<Vec<VideoInfo>, SendableError> {
        let page_size = self.config.target_count.max(1) * 2;
        match candidates::recommend(&self.client, page_size).await {
            Ok(feed) => {
                let suitable: Vec<_> = feed
                    .into_iter()
                    .filter(|v| v.duration > 60 && v.duration < 1800)
                    .collect();
                if !suitable.is_empty() {
                    return Ok(suitable);
                }
                warn!("No recommended video of suitable length, using the ranking list");
            }
            Err(err) => warn!("Failed to fetch recommendations ({}), using the ranking list", err),
        }

        let ranking = candidates::ranking(&self.client)
            .await
            .map_err(|err| SendableError::from(format!("failed to fetch fallback videos: {err}")))?;
        Ok(ranking.into_iter().take(6).collect())
    }

    /// Full record for `video`, or a stand-in when the detail lookup fails.
    async fn detail(&self, video: &VideoInfo) -> VideoInfo {
        let lookup = self
            .client
            .video_view(&video.bvid)
            .await
            .and_then(|response| response.into_data("view"));
        match lookup {
            Ok(view) => view.into_video(),
            Err(err) => {
                warn!("Failed to fetch video detail: {}", err);
                VideoInfo {
                    aid: video.aid,
                    bvid: video.bvid.clone(),
                    title: video.title.clone(),
                    duration: FALLBACK_DURATION,
                    pages: vec![VideoPage {
                        page: 1,
                        part: "1".into(),
                        duration: FALLBACK_DURATION,
                        ..Default::default()
                    }],
                    owner: None,
                }
            }
        }
    }

    async fn simulate(&self, video: &VideoInfo, watch_seconds: u64) {
        let wait = watch_seconds.min(self.config.max_watch_seconds);
        let steps = MAX_HEARTBEAT_STEPS.min(wait / 10);
        if steps == 0 {
            if wait > 0 {
                tokio::time::sleep(Duration::from_secs(wait)).await;
            }
            return;
        }

        let step_wait = Duration::from_secs(wait) / steps as u32;
        for step in 1..=steps {
            tokio::time::sleep(step_wait).await;
            let beat = heartbeat(video, watch_seconds * step / steps);
            if let Err(err) = self.client.heartbeat(&beat).await {
                debug!("Heartbeat {}/{} failed: {}", step, steps, err);
            }
        }
    }

    async fn watch_one(&self, video: &VideoInfo) -> WatchResult {
        info!("Watching video: {}", video.title);
        let detail = self.detail(video).await;
        let watch_seconds = watch_duration(detail.duration);

        let click = ClickReport {
            aid: detail.aid,
            cid: detail.first_cid(),
            bvid: detail.bvid.clone(),
        };
        if let Err(err) = self.client.click_h5(&click).await {
            debug!("Playback start report failed: {}", err);
        }

        self.simulate(&detail, watch_seconds).await;

        let (success, message) = match self.client.heartbeat(&heartbeat(&detail, watch_seconds)).await {
            Ok(response) if response.is_ok() => (true, "watched".to_string()),
            Ok(response) => (false, format!("progress report rejected: {}", response.message)),
            Err(err) => (false, error_message(&err)),
        };
        if success {
            info!("Finished watching: {}", video.title);
        } else {
            warn!("Watching {} failed: {}", video.title, message);
        }

        WatchResult {
            aid: video.aid,
            bvid: Some(video.bvid.clone()),
            title: video.title.clone(),
            watch_duration: if success { watch_seconds } else { 0 },
            success,
            message: Some(message),
        }
    }

    async fn run(&self) -> Result<TaskResult, SendableError> {
        let target = self.config.target_count as usize;
        let videos = self.candidates().await?;
        let picked: Vec<_> = videos.into_iter().take(target).collect();

        let mut results = Vec::with_capacity(picked.len());
        for (index, video) in picked.iter().enumerate() {
            results.push(self.watch_one(video).await);
            if index + 1 < picked.len() && self.config.interval_seconds > 0 {
                tokio::time::sleep(Duration::from_secs(self.config.interval_seconds)).await;
            }
        }

        let success_count = results.iter().filter(|r| r.success).count();
        let message = format!("watched {}/{} videos", success_count, target);
        if success_count > 0 {
            info!("{}", message);
        } else {
            warn!("{}", message);
        }

        Ok(TaskResult::new(self.task_type(), self.name(), success_count > 0, message).with_data(
            json!({
                "results": results,
                "successCount": success_count,
                "totalCount": target,
            }),
        ))
    }
}

/// Seconds of playback to report: 20-50% of the video, at least 30 and at most 300.
fn watch_duration(duration: u64) -> u64 {
    let min = 30.max(duration / 5);
    let max = min.max(300.min(duration / 2));
    rand::thread_rng().gen_range(min..=max)
}

fn heartbeat(video: &VideoInfo, played_seconds: u64) -> Heartbeat {
    Heartbeat {
        aid: video.aid,
        bvid: video.bvid.clone(),
        cid: Some(video.first_cid()),
        played_seconds,
    }
}

#[async_trait]
impl Task for WatchVideoTask {
    fn task_type(&self) -> TaskType {
        TaskType::WatchVideo
    }

    fn name(&self) -> &str {
        "watch video task"
    }

    async fn execute(&self) -> Result<TaskResult, SendableError> {
        info!("──── watch videos ────");
        match self.run().await {
            Ok(result) => Ok(result),
            Err(err) => {
                let message = error_message(err.as_ref());
                error!("Watch video task failed: {}", message);
                Ok(TaskResult::failure(self.task_type(), self.name(), message))
            }
        }
    }
}
