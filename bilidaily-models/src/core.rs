use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "loginTask")]
    Login,
    #[serde(rename = "addCoins")]
    AddCoins,
    #[serde(rename = "shareAndWatch")]
    ShareAndWatch,
    #[serde(rename = "watchVideo")]
    WatchVideo,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Login => "loginTask",
            TaskType::AddCoins => "addCoins",
            TaskType::ShareAndWatch => "shareAndWatch",
            TaskType::WatchVideo => "watchVideo",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one task execution. Never mutated once handed to the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub task_type: TaskType,
    pub name: String,
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TaskResult {
    pub fn success(task_type: TaskType, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(task_type, name, true, message)
    }

    pub fn failure(task_type: TaskType, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(task_type, name, false, message)
    }

    pub fn new(
        task_type: TaskType,
        name: impl Into<String>,
        success: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            task_type,
            name: name.into(),
            success,
            message: message.into(),
            timestamp: Utc::now(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Identity snapshot produced by the login task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub uid: String,
    pub username: String,
    pub level: u32,
    pub coins: f64,
    pub vip_type: i32,
    pub vip_status: i32,
    pub is_login: bool,
}

impl UserInfo {
    pub fn is_vip(&self) -> bool {
        self.vip_status == 1
    }
}

/// Aggregate of one full scheduler run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerResult {
    pub success: bool,
    pub message: String,
    pub results: Vec<TaskResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    #[serde(serialize_with = "serialize_millis")]
    pub total_time: Duration,
}

impl SchedulerResult {
    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn exit_code(&self) -> u8 {
        if self.success {
            0
        } else {
            1
        }
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Outcome of a single coin donation attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinResult {
    pub aid: i64,
    pub bvid: Option<String>,
    pub title: Option<String>,
    pub coins: u32,
    pub success: bool,
    pub message: Option<String>,
}

/// Outcome of a single simulated watch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchResult {
    pub aid: i64,
    pub bvid: Option<String>,
    pub title: String,
    pub watch_duration: u64,
    pub success: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_type_serializes_to_wire_names() {
        let json = serde_json::to_string(&TaskType::AddCoins).unwrap();
        assert_eq!(json, "\"addCoins\"");
        assert_eq!(TaskType::Login.to_string(), "loginTask");
    }

    #[test]
    fn scheduler_result_reports_total_time_in_millis() {
        let result = SchedulerResult {
            success: true,
            message: "1/1 tasks succeeded".into(),
            results: vec![TaskResult::success(TaskType::Login, "login", "ok")],
            user_info: None,
            total_time: Duration::from_millis(1500),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["totalTime"], 1500);
        assert_eq!(value["results"][0]["taskType"], "loginTask");
        assert!(value.get("userInfo").is_none());
        assert_eq!(result.exit_code(), 0);
    }
}
