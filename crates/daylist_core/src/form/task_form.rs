//! Task entry form.

use crate::device::picker::{
    CalendarDay, Capability, DeviceError, ImagePick, PermissionStatus, TimePick, TimePickAction,
};
use crate::model::task::{NewTask, TaskValidationError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Editable state behind the "new task" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// Empty until a calendar day is selected.
    pub date: String,
    /// Empty until a time pick is confirmed.
    pub time: String,
    pub image_ref: Option<String>,
    pub calendar_visible: bool,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn open_calendar(&mut self) {
        self.calendar_visible = true;
    }

    /// Applies a calendar selection; selecting a day closes the calendar.
    pub fn select_day(&mut self, day: CalendarDay) {
        self.date = day.date_string;
        self.calendar_visible = false;
    }

    /// Applies a time-picker result.
    ///
    /// Dismissed picks leave `time` as it was.
    ///
    /// # Errors
    /// - `InvalidTime` when a confirmed pick is outside `00:00..=23:59`.
    pub fn apply_time_pick(&mut self, pick: TimePick) -> Result<(), TaskValidationError> {
        if pick.action == TimePickAction::Dismissed {
            debug!("event=time_pick module=form status=dismissed");
            return Ok(());
        }
        match pick.to_time_string() {
            Some(time) => {
                self.time = time;
                Ok(())
            }
            None => Err(TaskValidationError::InvalidTime(format!(
                "{}:{}",
                pick.hour, pick.minute
            ))),
        }
    }

    /// Applies an image-picker result gated by media-library permission.
    ///
    /// # Errors
    /// - `PermissionDenied(MediaLibrary)` when permission is not granted;
    ///   the selected image is left unset.
    pub fn apply_image_pick(
        &mut self,
        permission: PermissionStatus,
        pick: ImagePick,
    ) -> Result<(), DeviceError> {
        if !permission.is_granted() {
            debug!("event=image_pick module=form status=permission_denied");
            return Err(DeviceError::PermissionDenied(Capability::MediaLibrary));
        }
        if let ImagePick::Picked(uri) = pick {
            self.image_ref = Some(uri);
        }
        Ok(())
    }

    /// Builds the add request from the current field values.
    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            image_ref: self.image_ref.clone(),
        }
    }

    /// Resets every field for the next entry.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
