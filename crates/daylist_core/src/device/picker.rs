//! Picker and permission outcomes.
//!
//! # Responsibility
//! - Model calendar, time-picker and image-picker results.
//! - Convert raw picker values into task field strings.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// OS permission state for a device capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Device capabilities gated behind a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    MediaLibrary,
    Notifications,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MediaLibrary => "media_library",
            Self::Notifications => "notifications",
        }
    }
}

/// Device capability failure; reported to the user, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The user or OS refused access to a capability.
    PermissionDenied(Capability),
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied(capability) => {
                write!(f, "permission denied for {}", capability.as_str())
            }
        }
    }
}

impl Error for DeviceError {}

/// Day selected in the calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// `YYYY-MM-DD` as produced by the calendar widget.
    pub date_string: String,
}

/// How the time picker was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePickAction {
    Confirmed,
    Dismissed,
}

/// Raw time-picker result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePick {
    pub action: TimePickAction,
    pub hour: u8,
    pub minute: u8,
}

impl TimePick {
    pub fn confirmed(hour: u8, minute: u8) -> Self {
        Self {
            action: TimePickAction::Confirmed,
            hour,
            minute,
        }
    }

    pub fn dismissed() -> Self {
        Self {
            action: TimePickAction::Dismissed,
            hour: 0,
            minute: 0,
        }
    }

    /// Formats a confirmed pick as zero-padded `HH:MM`.
    ///
    /// Returns `None` for dismissed picks and for out-of-range values.
    pub fn to_time_string(&self) -> Option<String> {
        if self.action == TimePickAction::Dismissed || self.hour > 23 || self.minute > 59 {
            return None;
        }
        Some(format!("{:02}:{:02}", self.hour, self.minute))
    }
}

/// Image-library picker result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePick {
    /// Opaque URI of the chosen image.
    Picked(String),
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::{Capability, DeviceError, TimePick};

    #[test]
    fn time_pick_is_zero_padded() {
        assert_eq!(TimePick::confirmed(9, 5).to_time_string().as_deref(), Some("09:05"));
        assert_eq!(TimePick::confirmed(23, 59).to_time_string().as_deref(), Some("23:59"));
    }

    #[test]
    fn dismissed_or_out_of_range_pick_yields_nothing() {
        assert_eq!(TimePick::dismissed().to_time_string(), None);
        assert_eq!(TimePick::confirmed(24, 0).to_time_string(), None);
        assert_eq!(TimePick::confirmed(12, 60).to_time_string(), None);
    }

    #[test]
    fn permission_denied_names_capability() {
        let err = DeviceError::PermissionDenied(Capability::MediaLibrary);
        assert_eq!(err.to_string(), "permission denied for media_library");
    }
}
