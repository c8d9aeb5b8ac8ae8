//! FFI use-case API for the mobile shell.
//!
//! # Responsibility
//! - Expose task list, form and notification use-cases to Dart via FRB.
//! - Serialize every session access through one process-wide mutex.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Task identity crosses the boundary as raw `u64` IDs; positions are
//!   resolved under the session lock so they cannot go stale.
//! - The session lock is never held across an `.await`.

use daylist_core::{
    compass_heading as compass_heading_inner, core_version as core_version_inner, dispatch_for,
    init_logging as init_logging_inner, ping as ping_inner, CalendarDay, DispatchConfig,
    DispatchOutcome, HttpPushDispatcher, ImagePick, NotificationChannel, PermissionStatus,
    PushDispatcher, Task, TaskId, TaskSession, TimePick,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static SESSION: OnceLock<Mutex<TaskSession>> = OnceLock::new();
static DISPATCHER: OnceLock<HttpPushDispatcher> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Task row rendered by the list and details views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub completed: bool,
    pub image_ref: Option<String>,
}

impl From<&Task> for TaskItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.get(),
            title: task.title.clone(),
            description: task.description.clone(),
            date: task.date.clone(),
            time: task.time.clone(),
            completed: task.completed,
            image_ref: task.image_ref.clone(),
        }
    }
}

/// Generic action envelope for task and form mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected task, when there is one.
    pub task: Option<TaskItem>,
    /// Human-readable message for UI alerts.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task: Option<TaskItem>) -> Self {
        Self {
            ok: true,
            task,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            message: message.into(),
        }
    }
}

/// Current entry form values, used to re-render after picker callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub image_ref: Option<String>,
    pub calendar_visible: bool,
}

/// Result of the post-add notification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyResponse {
    /// `sent`, `skipped` or `failed`.
    pub status: String,
    pub message: String,
}

/// Android channel settings for `setNotificationChannelAsync`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSettings {
    pub id: String,
    pub name: String,
    pub importance: String,
    pub vibration_pattern: Vec<u32>,
    pub light_color: String,
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_set_title(title: String) -> FormState {
    form_set_title_in(session(), title)
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_set_description(description: String) -> FormState {
    form_set_description_in(session(), description)
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_open_calendar() -> FormState {
    let mut guard = lock(session());
    guard.open_calendar();
    form_state_of(&guard)
}

/// Applies a calendar `dateString` and closes the calendar.
#[flutter_rust_bridge::frb(sync)]
pub fn form_select_day(date_string: String) -> FormState {
    form_select_day_in(session(), date_string)
}

/// Applies a time-picker result; `confirmed = false` means dismissed.
///
/// # FFI contract
/// - Dismissed picks leave the selected time unchanged.
/// - Out-of-range hour/minute returns `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn form_apply_time_pick(confirmed: bool, hour: u8, minute: u8) -> TaskActionResponse {
    form_apply_time_pick_in(session(), confirmed, hour, minute)
}

/// Applies an image-picker result gated by media-library permission.
///
/// # FFI contract
/// - `permission_granted = false` returns `ok = false` with a
///   permission-denied message and leaves the image unset.
/// - `uri = None` means the user cancelled the picker.
#[flutter_rust_bridge::frb(sync)]
pub fn form_apply_image_pick(
    permission_granted: bool,
    uri: Option<String>,
) -> TaskActionResponse {
    form_apply_image_pick_in(session(), permission_granted, uri)
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_state() -> FormState {
    form_state_of(&lock(session()))
}

/// Adds the current form contents as a task.
///
/// # FFI contract
/// - On success returns the created task; the form is cleared.
/// - On validation failure returns `ok = false`; nothing changes.
/// - Callers trigger `task_notify` separately after a successful add.
#[flutter_rust_bridge::frb(sync)]
pub fn task_submit() -> TaskActionResponse {
    task_submit_in(session())
}

/// Returns the current date-ordered task snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> Vec<TaskItem> {
    task_list_in(session())
}

/// Removes one task by ID.
#[flutter_rust_bridge::frb(sync)]
pub fn task_remove(task_id: u64) -> TaskActionResponse {
    task_remove_in(session(), task_id)
}

/// Flips the completed flag of one task by ID.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle_completed(task_id: u64) -> TaskActionResponse {
    task_toggle_completed_in(session(), task_id)
}

/// Returns one task for the details view, if it still exists.
#[flutter_rust_bridge::frb(sync)]
pub fn task_details(task_id: u64) -> Option<TaskItem> {
    lock(session())
        .task_details(TaskId::from_raw(task_id))
        .map(TaskItem::from)
}

/// Stores the push registration result.
///
/// # FFI contract
/// - `token = None` or blank means unavailable (e.g. emulator); later
///   notifications are skipped, task creation is unaffected.
/// - `permission_granted = false` returns `ok = false` and drops any token.
#[flutter_rust_bridge::frb(sync)]
pub fn set_push_token(permission_granted: bool, token: Option<String>) -> TaskActionResponse {
    set_push_token_in(session(), permission_granted, token)
}

/// Sends the "task created" push for a committed task.
///
/// # FFI contract
/// - Async; never blocks other session calls.
/// - Never fails task creation; failures come back as `status = failed`.
pub async fn task_notify(task_id: u64) -> NotifyResponse {
    match dispatcher() {
        Ok(dispatcher) => task_notify_in(session(), dispatcher, task_id).await,
        Err(message) => NotifyResponse {
            status: "failed".to_string(),
            message,
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn notification_channel() -> ChannelSettings {
    let channel = NotificationChannel::default_channel();
    ChannelSettings {
        id: channel.id,
        name: channel.name,
        importance: channel.importance.as_str().to_string(),
        vibration_pattern: channel.vibration_pattern,
        light_color: channel.light_color,
    }
}

/// Heading in degrees `[0, 360)` from a magnetometer sample.
#[flutter_rust_bridge::frb(sync)]
pub fn compass_heading(x: f64, y: f64) -> f64 {
    compass_heading_inner(x, y)
}

fn session() -> &'static Mutex<TaskSession> {
    SESSION.get_or_init(|| Mutex::new(TaskSession::new()))
}

fn lock(session: &Mutex<TaskSession>) -> MutexGuard<'_, TaskSession> {
    // List operations validate before writing, so a poisoned session is
    // still consistent.
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

fn dispatcher() -> Result<&'static HttpPushDispatcher, String> {
    if let Some(dispatcher) = DISPATCHER.get() {
        return Ok(dispatcher);
    }
    let built = HttpPushDispatcher::new(DispatchConfig::from_env())
        .map_err(|err| format!("push dispatcher init failed: {err}"))?;
    Ok(DISPATCHER.get_or_init(|| built))
}

fn form_state_of(session: &TaskSession) -> FormState {
    let form = session.form();
    FormState {
        title: form.title.clone(),
        description: form.description.clone(),
        date: form.date.clone(),
        time: form.time.clone(),
        image_ref: form.image_ref.clone(),
        calendar_visible: form.calendar_visible,
    }
}

fn form_set_title_in(session: &Mutex<TaskSession>, title: String) -> FormState {
    let mut guard = lock(session);
    guard.set_title(title);
    form_state_of(&guard)
}

fn form_set_description_in(session: &Mutex<TaskSession>, description: String) -> FormState {
    let mut guard = lock(session);
    guard.set_description(description);
    form_state_of(&guard)
}

fn form_select_day_in(session: &Mutex<TaskSession>, date_string: String) -> FormState {
    let mut guard = lock(session);
    guard.select_day(CalendarDay { date_string });
    form_state_of(&guard)
}

fn form_apply_time_pick_in(
    session: &Mutex<TaskSession>,
    confirmed: bool,
    hour: u8,
    minute: u8,
) -> TaskActionResponse {
    let pick = if confirmed {
        TimePick::confirmed(hour, minute)
    } else {
        TimePick::dismissed()
    };
    match lock(session).apply_time_pick(pick) {
        Ok(()) => TaskActionResponse::success("Time updated.", None),
        Err(err) => TaskActionResponse::failure(format!("form_apply_time_pick failed: {err}")),
    }
}

fn form_apply_image_pick_in(
    session: &Mutex<TaskSession>,
    permission_granted: bool,
    uri: Option<String>,
) -> TaskActionResponse {
    let permission = if permission_granted {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Denied
    };
    let pick = uri.map_or(ImagePick::Cancelled, ImagePick::Picked);
    match lock(session).apply_image_pick(permission, pick) {
        Ok(()) => TaskActionResponse::success("Image updated.", None),
        Err(err) => TaskActionResponse::failure(format!("form_apply_image_pick failed: {err}")),
    }
}

fn set_push_token_in(
    session: &Mutex<TaskSession>,
    permission_granted: bool,
    token: Option<String>,
) -> TaskActionResponse {
    let permission = if permission_granted {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Denied
    };
    match lock(session).register_push(permission, token.as_deref()) {
        Ok(()) => TaskActionResponse::success("Push registration updated.", None),
        Err(err) => TaskActionResponse::failure(format!("set_push_token failed: {err}")),
    }
}

fn task_submit_in(session: &Mutex<TaskSession>) -> TaskActionResponse {
    match lock(session).submit() {
        Ok(task) => TaskActionResponse::success("Task added.", Some(TaskItem::from(&task))),
        Err(err) => TaskActionResponse::failure(format!("task_submit failed: {err}")),
    }
}

fn task_list_in(session: &Mutex<TaskSession>) -> Vec<TaskItem> {
    lock(session).tasks().iter().map(TaskItem::from).collect()
}

fn task_remove_in(session: &Mutex<TaskSession>, task_id: u64) -> TaskActionResponse {
    let mut guard = lock(session);
    let Some(index) = guard.position_of(TaskId::from_raw(task_id)) else {
        return TaskActionResponse::failure(format!("task_remove failed: no task {task_id}"));
    };
    match guard.remove(index) {
        Ok(task) => TaskActionResponse::success("Task removed.", Some(TaskItem::from(&task))),
        Err(err) => TaskActionResponse::failure(format!("task_remove failed: {err}")),
    }
}

fn task_toggle_completed_in(session: &Mutex<TaskSession>, task_id: u64) -> TaskActionResponse {
    let mut guard = lock(session);
    let Some(index) = guard.position_of(TaskId::from_raw(task_id)) else {
        return TaskActionResponse::failure(format!(
            "task_toggle_completed failed: no task {task_id}"
        ));
    };
    match guard.toggle_completed(index) {
        Ok(task) => TaskActionResponse::success("Task updated.", Some(TaskItem::from(&task))),
        Err(err) => TaskActionResponse::failure(format!("task_toggle_completed failed: {err}")),
    }
}

async fn task_notify_in<D>(
    session: &Mutex<TaskSession>,
    dispatcher: &D,
    task_id: u64,
) -> NotifyResponse
where
    D: PushDispatcher + ?Sized,
{
    let (token, task) = {
        let guard = lock(session);
        let task = guard.task_details(TaskId::from_raw(task_id)).cloned();
        (guard.push_token().cloned(), task)
    };

    let Some(task) = task else {
        return NotifyResponse {
            status: "failed".to_string(),
            message: format!("task_notify failed: no task {task_id}"),
        };
    };
    match dispatch_for(dispatcher, token, &task).await {
        DispatchOutcome::Sent => NotifyResponse {
            status: "sent".to_string(),
            message: "Notification sent.".to_string(),
        },
        DispatchOutcome::Skipped => NotifyResponse {
            status: "skipped".to_string(),
            message: "No push token available.".to_string(),
        },
        DispatchOutcome::Failed(err) => {
            warn!("event=task_notify module=ffi status=error task_id={task_id}");
            NotifyResponse {
                status: "failed".to_string(),
                message: format!("task_notify failed: {err}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        compass_heading, core_version, form_apply_image_pick_in, form_apply_time_pick_in,
        form_select_day_in, form_set_description_in, form_set_title_in, init_logging,
        notification_channel, ping, set_push_token_in, task_list_in, task_notify_in,
        task_remove_in, task_submit_in, task_toggle_completed_in,
    };
    use async_trait::async_trait;
    use daylist_core::{DispatchError, PushDispatcher, PushMessage, TaskSession};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingDispatcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PushDispatcher for CountingDispatcher {
        async fn dispatch(&self, _message: &PushMessage) -> Result<(), DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn submit(session: &Mutex<TaskSession>, title: &str, date: &str) -> u64 {
        form_set_title_in(session, title.to_string());
        form_set_description_in(session, "details".to_string());
        form_select_day_in(session, date.to_string());
        assert!(form_apply_time_pick_in(session, true, 8, 5).ok);
        let response = task_submit_in(session);
        assert!(response.ok, "{}", response.message);
        response.task.expect("submit should return task").id
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn submit_orders_by_date_and_clears_form() {
        let session = Mutex::new(TaskSession::new());
        let a = submit(&session, "A", "2024-05-01");
        let b = submit(&session, "B", "2024-04-20");

        let ids: Vec<_> = task_list_in(&session).iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![b, a]);
        assert_eq!(task_list_in(&session)[0].time, "08:05");

        let state = form_set_title_in(&session, String::new());
        assert!(state.date.is_empty());
        assert!(state.time.is_empty());
    }

    #[test]
    fn submit_with_missing_fields_fails_without_mutation() {
        let session = Mutex::new(TaskSession::new());
        form_set_title_in(&session, "only a title".to_string());

        let response = task_submit_in(&session);

        assert!(!response.ok);
        assert!(response.message.contains("date is required"));
        assert!(task_list_in(&session).is_empty());
    }

    #[test]
    fn toggle_and_remove_resolve_ids_under_lock() {
        let session = Mutex::new(TaskSession::new());
        let a = submit(&session, "A", "2024-05-01");
        let b = submit(&session, "B", "2024-05-02");

        let toggled = task_toggle_completed_in(&session, b);
        assert!(toggled.ok);
        assert!(toggled.task.expect("toggled task").completed);

        assert!(task_remove_in(&session, a).ok);
        let missing = task_remove_in(&session, a);
        assert!(!missing.ok);
        assert_eq!(task_list_in(&session).len(), 1);
    }

    #[test]
    fn denied_image_permission_is_reported() {
        let session = Mutex::new(TaskSession::new());
        let response =
            form_apply_image_pick_in(&session, false, Some("file:///a.jpg".to_string()));
        assert!(!response.ok);
        assert!(response.message.contains("permission denied"));
    }

    #[test]
    fn out_of_range_time_pick_is_reported() {
        let session = Mutex::new(TaskSession::new());
        assert!(!form_apply_time_pick_in(&session, true, 25, 0).ok);
        assert!(form_apply_time_pick_in(&session, false, 25, 0).ok);
    }

    #[tokio::test]
    async fn notify_is_skipped_without_token_and_sent_with_one() {
        let session = Mutex::new(TaskSession::new());
        let id = submit(&session, "A", "2024-05-01");
        let dispatcher = CountingDispatcher {
            calls: AtomicUsize::new(0),
        };

        let skipped = task_notify_in(&session, &dispatcher, id).await;
        assert_eq!(skipped.status, "skipped");

        let denied = set_push_token_in(&session, false, Some("ExponentPushToken[abc]".into()));
        assert!(!denied.ok);
        assert!(denied.message.contains("notifications"));
        assert_eq!(task_notify_in(&session, &dispatcher, id).await.status, "skipped");

        assert!(set_push_token_in(&session, true, Some("ExponentPushToken[abc]".into())).ok);
        let sent = task_notify_in(&session, &dispatcher, id).await;
        assert_eq!(sent.status, "sent");
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 1);

        let unknown = task_notify_in(&session, &dispatcher, 999).await;
        assert_eq!(unknown.status, "failed");
    }

    #[test]
    fn channel_and_heading_are_exposed() {
        let channel = notification_channel();
        assert_eq!(channel.importance, "max");
        assert_eq!(channel.vibration_pattern, vec![0, 250, 250, 250]);
        assert!((compass_heading(0.0, 1.0) - 90.0).abs() < 1e-9);
    }
}
