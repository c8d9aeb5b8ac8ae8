//! Core domain logic for Daylist.
//! This crate is the single source of truth for task list invariants.

pub mod device;
pub mod form;
pub mod list;
pub mod logging;
pub mod model;
pub mod notify;
pub mod session;

pub use device::picker::{
    CalendarDay, Capability, DeviceError, ImagePick, PermissionStatus, TimePick, TimePickAction,
};
pub use device::sensors::{compass_heading, GyroscopeReading, SENSOR_UPDATE_INTERVAL};
pub use form::task_form::TaskForm;
pub use list::task_list::{TaskList, TaskListError, TaskListResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{NewTask, Task, TaskField, TaskId, TaskValidationError};
pub use notify::dispatcher::{
    DispatchConfig, DispatchError, HttpPushDispatcher, PushDispatcher, DEFAULT_PUSH_ENDPOINT,
};
pub use notify::message::{NotificationChannel, PushData, PushMessage, PushToken};
pub use session::task_session::{dispatch_for, DispatchOutcome, TaskSession};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
