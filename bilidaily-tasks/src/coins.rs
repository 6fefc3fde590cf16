use std::{collections::HashSet, sync::Arc, time::Duration};

use async_trait::async_trait;
use bilidaily_api::{BiliClient, ResponseExt};
use bilidaily_config::CoinTaskConfig;
use bilidaily_models::{
    core::{CoinResult, TaskResult, TaskType, UserInfo},
    errors::{error_message, SendableError},
    web::VideoInfo,
};
use log::{debug, error, info, warn};
use serde_json::json;

use crate::{candidates, Task};

/// Donates coins to ranking videos until the daily target is met.
pub struct CoinTask {
    client: Arc<BiliClient>,
    config: CoinTaskConfig,
    user: Option<UserInfo>,
}

impl CoinTask {
    pub fn new(client: Arc<BiliClient>, config: CoinTaskConfig, user: Option<UserInfo>) -> Self {
        Self {
            client,
            config,
            user,
        }
    }

    /// Coins already donated today, derived from today's coin experience.
    async fn today_coins(&self) -> u32 {
        match self.client.today_coin_exp().await.and_then(|r| r.into_data("coin/today/exp")) {
            Ok(exp) => (exp.max(0) / 10) as u32,
            Err(err) => {
                warn!("Failed to fetch today's coin count: {}", err);
                0
            }
        }
    }

    /// Coins the balance allows without dropping under `stay_coins`.
    fn spendable(&self) -> Option<u32> {
        self.user.as_ref().map(|user| {
            let available = user.coins.floor() - f64::from(self.config.stay_coins);
            available.max(0.0) as u32
        })
    }

    async fn candidates(&self) -> Result<Vec<VideoInfo>, SendableError> {
        let list = candidates::ranking(&self.client)
            .await
            .map_err(|err| SendableError::from(format!("failed to fetch ranking videos: {err}")))?;
        let take = (self.config.target_coins as usize * 2).max(1);
        Ok(candidates::shuffled(list).into_iter().take(take).collect())
    }

    async fn donate(&self, video: &VideoInfo, coins: u32) -> CoinResult {
        info!("Donating {} coin(s) to: {}", coins, video.title);
        let outcome = self
            .client
            .add_coin(video.aid, coins, self.config.select_like)
            .await;

        let (success, message) = match outcome {
            Ok(response) if response.is_ok() => {
                info!("Donated {} coin(s) to: {}", coins, video.title);
                (true, "donated".to_string())
            }
            Ok(response) => {
                error!("Donation failed: {} - {}", video.title, response.message);
                (false, response.message)
            }
            Err(err) => {
                let message = error_message(&err);
                error!("Donation error: {} - {}", video.title, message);
                (false, message)
            }
        };

        CoinResult {
            aid: video.aid,
            bvid: Some(video.bvid.clone()),
            title: Some(video.title.clone()),
            coins: if success { coins } else { 0 },
            success,
            message: Some(message),
        }
    }

    async fn run(&self) -> Result<TaskResult, SendableError> {
        if let Some(user) = &self.user {
            if self.config.target_level > 0 && user.level >= self.config.target_level {
                let message = format!(
                    "level {} reached target level {}, skipping donations",
                    user.level, self.config.target_level
                );
                info!("{}", message);
                return Ok(TaskResult::success(self.task_type(), self.name(), message));
            }
        }

        let today = self.today_coins().await;
        let mut needed = self.config.target_coins.saturating_sub(today);
        debug!("Coin target {}, donated today {}", self.config.target_coins, today);
        if needed == 0 {
            let message = "daily coin target already reached".to_string();
            info!("{}", message);
            return Ok(TaskResult::success(self.task_type(), self.name(), message));
        }

        if let Some(spendable) = self.spendable() {
            if spendable < needed {
                warn!(
                    "Balance only allows {} more coin(s) while keeping {}",
                    spendable, self.config.stay_coins
                );
                needed = spendable;
            }
        }

        if needed == 0 {
            let message = "no coins left to donate today".to_string();
            info!("{}", message);
            return Ok(TaskResult::success(self.task_type(), self.name(), message));
        }

        let mut results: Vec<CoinResult> = Vec::new();
        let mut tried = HashSet::new();
        let mut total = 0u32;
        let rounds = self.config.retry_num.max(1);

        'rounds: for round in 0..rounds {
            let videos = match self.candidates().await {
                Ok(videos) => videos,
                Err(err) if round == 0 => return Err(err),
                Err(err) => {
                    warn!("Stopping after {} candidate round(s): {}", round, err);
                    break;
                }
            };
            debug!("Round {}: {} candidate videos", round + 1, videos.len());

            let fresh: Vec<_> = videos.into_iter().filter(|v| tried.insert(v.aid)).collect();
            if fresh.is_empty() {
                break;
            }

            for video in fresh {
                if total >= needed {
                    break 'rounds;
                }
                let coins = self.config.coins_per_video.min(needed - total);
                let result = self.donate(&video, coins).await;
                total += result.coins;
                results.push(result);

                if total < needed && self.config.interval_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(self.config.interval_ms)).await;
                }
            }

            if total >= needed {
                break;
            }
        }

        let success_count = results.iter().filter(|r| r.success).count();
        let message = format!(
            "donated {} coin(s) to {} video(s), target {}",
            total, success_count, needed
        );
        if success_count > 0 {
            info!("{}", message);
        } else {
            warn!("{}", message);
        }

        Ok(TaskResult::new(self.task_type(), self.name(), success_count > 0, message).with_data(
            json!({
                "results": results,
                "totalCoins": total,
                "successCount": success_count,
            }),
        ))
    }
}

#[async_trait]
impl Task for CoinTask {
    fn task_type(&self) -> TaskType {
        TaskType::AddCoins
    }

    fn name(&self) -> &str {
        "coin task"
    }

    async fn execute(&self) -> Result<TaskResult, SendableError> {
        info!("──── coin donation ────");
        match self.run().await {
            Ok(result) => Ok(result),
            Err(err) => {
                let message = error_message(err.as_ref());
                error!("Coin task failed: {}", message);
                Ok(TaskResult::failure(self.task_type(), self.name(), message))
            }
        }
    }
}
