//! Task session service.
//!
//! # Responsibility
//! - Provide stable entry points for the presentation layer.
//! - Keep notification delivery decoupled from list correctness.
//!
//! # Invariants
//! - `submit` clears the form only after the task is committed.
//! - `notify_created` never mutates the list, whatever the outcome.

use crate::device::picker::{
    CalendarDay, Capability, DeviceError, ImagePick, PermissionStatus, TimePick,
};
use crate::form::task_form::TaskForm;
use crate::list::task_list::{TaskList, TaskListResult};
use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::notify::dispatcher::{DispatchError, PushDispatcher};
use crate::notify::message::{PushMessage, PushToken};
use log::{info, warn};

/// Result of the post-add notification step.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Relay accepted the message.
    Sent,
    /// No destination token is available (e.g. simulator); nothing was sent.
    Skipped,
    /// Send failed; the task stays committed.
    Failed(DispatchError),
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Session-scoped owner of all task state.
#[derive(Debug, Default)]
pub struct TaskSession {
    tasks: TaskList,
    form: TaskForm,
    push_token: Option<PushToken>,
}

impl TaskSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.set_title(title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.set_description(description);
    }

    pub fn open_calendar(&mut self) {
        self.form.open_calendar();
    }

    pub fn select_day(&mut self, day: CalendarDay) {
        self.form.select_day(day);
    }

    pub fn apply_time_pick(&mut self, pick: TimePick) -> Result<(), TaskValidationError> {
        self.form.apply_time_pick(pick)
    }

    pub fn apply_image_pick(
        &mut self,
        permission: PermissionStatus,
        pick: ImagePick,
    ) -> Result<(), DeviceError> {
        self.form.apply_image_pick(permission, pick)
    }

    /// Stores the platform push token; blank or `None` clears it.
    pub fn set_push_token(&mut self, raw: Option<&str>) {
        self.push_token = raw.and_then(PushToken::parse);
        info!(
            "event=push_token module=session status=ok available={}",
            self.push_token.is_some()
        );
    }

    /// Applies the notification permission prompt and token lookup result.
    ///
    /// # Errors
    /// - `PermissionDenied(Notifications)` when permission is not granted;
    ///   any previous token is dropped so later dispatches are skipped.
    pub fn register_push(
        &mut self,
        permission: PermissionStatus,
        token: Option<&str>,
    ) -> Result<(), DeviceError> {
        if !permission.is_granted() {
            self.set_push_token(None);
            return Err(DeviceError::PermissionDenied(Capability::Notifications));
        }
        self.set_push_token(token);
        Ok(())
    }

    pub fn push_token(&self) -> Option<&PushToken> {
        self.push_token.as_ref()
    }

    /// Adds the form contents to the list (step one of add-then-notify).
    ///
    /// # Contract
    /// - Success returns the committed task and resets the form.
    /// - Failure reports the validation error and keeps form and list intact.
    pub fn submit(&mut self) -> TaskListResult<Task> {
        let task = self.tasks.add(self.form.to_new_task())?;
        self.form.clear();
        Ok(task)
    }

    /// Sends the "task created" notification (step two of add-then-notify).
    ///
    /// Takes the committed task by reference so callers cannot dispatch for a
    /// failed add.
    pub async fn notify_created<D>(&self, dispatcher: &D, task: &Task) -> DispatchOutcome
    where
        D: PushDispatcher + ?Sized,
    {
        dispatch_for(dispatcher, self.push_token.clone(), task).await
    }

    pub fn remove(&mut self, index: usize) -> TaskListResult<Task> {
        self.tasks.remove(index)
    }

    pub fn toggle_completed(&mut self, index: usize) -> TaskListResult<Task> {
        self.tasks.toggle_completed(index).cloned()
    }

    /// Current ordered snapshot for rendering.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.list()
    }

    /// Looks up one task for the details view.
    pub fn task_details(&self, id: TaskId) -> Option<&Task> {
        self.tasks
            .position_of(id)
            .and_then(|index| self.tasks.get(index))
    }

    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.position_of(id)
    }
}

/// Sends one task notification, skipping it when no token is available.
///
/// Exposed separately so a caller holding a lock on the session can copy the
/// token and task out, release the lock, and only then await the send.
pub async fn dispatch_for<D>(
    dispatcher: &D,
    token: Option<PushToken>,
    task: &Task,
) -> DispatchOutcome
where
    D: PushDispatcher + ?Sized,
{
    let Some(token) = token else {
        info!(
            "event=push_dispatch module=session status=skipped reason=no_token task_id={}",
            task.id
        );
        return DispatchOutcome::Skipped;
    };
    let message = PushMessage::for_task(token, task);
    match dispatcher.dispatch(&message).await {
        Ok(()) => {
            info!(
                "event=push_dispatch module=session status=ok task_id={}",
                task.id
            );
            DispatchOutcome::Sent
        }
        Err(err) => {
            warn!(
                "event=push_dispatch module=session status=error task_id={} error={}",
                task.id, err
            );
            DispatchOutcome::Failed(err)
        }
    }
}
