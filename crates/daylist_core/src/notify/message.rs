//! Push payload and channel settings.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};

const DEFAULT_SOUND: &str = "default";

/// Destination token issued by the platform push service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    /// Parses a raw token; blank input means "no token available".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extra data delivered alongside the visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushData {
    pub task_id: u64,
    pub date: String,
    pub time: String,
}

/// JSON body accepted by the push relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Serialized as `to` to match the relay schema.
    #[serde(rename = "to")]
    pub destination: PushToken,
    pub sound: String,
    pub title: String,
    pub body: String,
    pub data: PushData,
}

impl PushMessage {
    /// Builds the "task created" notification for `task`.
    pub fn for_task(destination: PushToken, task: &Task) -> Self {
        Self {
            destination,
            sound: DEFAULT_SOUND.to_string(),
            title: task.title.clone(),
            body: task.description.clone(),
            data: PushData {
                task_id: task.id.get(),
                date: task.date.clone(),
                time: task.time.clone(),
            },
        }
    }
}

/// Channel importance levels understood by Android.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelImportance {
    Default,
    High,
    Max,
}

impl ChannelImportance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::High => "high",
            Self::Max => "max",
        }
    }
}

/// Android notification channel the shell registers before requesting a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub importance: ChannelImportance,
    /// Alternating off/on durations in milliseconds.
    pub vibration_pattern: Vec<u32>,
    /// `#AARRGGBB`.
    pub light_color: String,
}

impl NotificationChannel {
    pub fn default_channel() -> Self {
        Self {
            id: "default".to_string(),
            name: "default".to_string(),
            importance: ChannelImportance::Max,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: "#FF231F7C".to_string(),
        }
    }
}
