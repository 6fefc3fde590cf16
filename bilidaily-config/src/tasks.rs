use std::fmt;

use crate::Config;

/// The closed set of tasks that may be switched off in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalTask {
    Coin,
    ShareAndWatch,
    WatchVideo,
}

impl OptionalTask {
    /// Execution order after login.
    pub const ORDER: [OptionalTask; 3] = [
        OptionalTask::Coin,
        OptionalTask::ShareAndWatch,
        OptionalTask::WatchVideo,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            OptionalTask::Coin => "coin task",
            OptionalTask::ShareAndWatch => "share and watch task",
            OptionalTask::WatchVideo => "watch video task",
        }
    }
}

impl fmt::Display for OptionalTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSettings {
    pub enabled: bool,
    pub delay_seconds: u64,
}

impl Config {
    pub fn task_settings(&self, task: OptionalTask) -> TaskSettings {
        let (enabled, delay_seconds) = match task {
            OptionalTask::Coin => (self.coin.enabled, self.coin.delay),
            OptionalTask::ShareAndWatch => (self.share_and_watch.enabled, self.share_and_watch.delay),
            OptionalTask::WatchVideo => (self.watch_video.enabled, self.watch_video.delay),
        };
        TaskSettings {
            enabled,
            delay_seconds,
        }
    }

    pub fn enabled_tasks(&self) -> impl Iterator<Item = OptionalTask> + '_ {
        OptionalTask::ORDER
            .into_iter()
            .filter(|task| self.task_settings(*task).enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_each_section() {
        let mut config = Config::default();
        config.coin.enabled = true;
        config.coin.delay = 7;
        config.share_and_watch.enabled = false;
        config.watch_video.enabled = true;
        config.watch_video.delay = 3;

        assert_eq!(
            config.task_settings(OptionalTask::Coin),
            TaskSettings { enabled: true, delay_seconds: 7 }
        );
        assert!(!config.task_settings(OptionalTask::ShareAndWatch).enabled);
        let enabled: Vec<_> = config.enabled_tasks().collect();
        assert_eq!(enabled, vec![OptionalTask::Coin, OptionalTask::WatchVideo]);
    }
}
