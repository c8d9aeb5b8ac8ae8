//! Task domain model.
//!
//! # Responsibility
//! - Define the to-do record shared by list, details and notification views.
//! - Validate creation input before any list mutation happens.
//!
//! # Invariants
//! - `id` is issued by `TaskList` only and never reused within a session.
//! - `title`, `date` and `time` are non-empty for every constructed task.
//! - `date` is `YYYY-MM-DD` and `time` is `HH:MM`, so lexical order is
//!   chronological order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid time regex"));

/// Session-unique task identifier.
///
/// Issued from a monotonic counter, so a later task always has a larger ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Rebuilds an ID from its raw form for lookups across FFI.
    ///
    /// Only `TaskList` issues fresh IDs.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer form used by FFI and push payloads.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user-created to-do item.
///
/// Serialize-only and non-exhaustive: tasks are issued by `TaskList::add`,
/// never decoded or built as literals outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Task {
    /// Stable session ID.
    pub id: TaskId,
    /// Required, non-empty.
    pub title: String,
    /// Free text, may be empty.
    pub description: String,
    /// Calendar date (`YYYY-MM-DD`), primary sort key.
    pub date: String,
    /// Time of day (`HH:MM`). Captured but not used for ordering.
    pub time: String,
    pub completed: bool,
    /// Opaque image reference (usually a local URI from the picker).
    pub image_ref: Option<String>,
}

impl Task {
    pub(crate) fn from_request(id: TaskId, request: NewTask) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description,
            date: request.date,
            time: request.time,
            completed: false,
            image_ref: request.image_ref,
        }
    }
}

/// Creation request for `TaskList::add`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub image_ref: Option<String>,
}

impl NewTask {
    /// Builds a request from required fields with empty description and no image.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            time: time.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Validates required fields in `title`, `date`, `time` order.
    ///
    /// # Errors
    /// - `MissingField` when a required field is empty after trimming.
    /// - `InvalidDate` / `InvalidTime` when a value is present but malformed.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::MissingField(TaskField::Title));
        }
        if self.date.trim().is_empty() {
            return Err(TaskValidationError::MissingField(TaskField::Date));
        }
        if self.time.trim().is_empty() {
            return Err(TaskValidationError::MissingField(TaskField::Time));
        }
        if !is_valid_date(&self.date) {
            return Err(TaskValidationError::InvalidDate(self.date.clone()));
        }
        if !is_valid_time(&self.time) {
            return Err(TaskValidationError::InvalidTime(self.time.clone()));
        }
        Ok(())
    }
}

/// Required task field names, used in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Date,
    Time,
}

impl TaskField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

/// Validation failure for task creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// A required field is empty.
    MissingField(TaskField),
    /// Date is not `YYYY-MM-DD`.
    InvalidDate(String),
    /// Time is not `HH:MM` (24-hour).
    InvalidTime(String),
}

impl TaskValidationError {
    /// Stable reason code for diagnostics; never includes the raw input.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::MissingField(TaskField::Title) => "missing_title",
            Self::MissingField(TaskField::Date) => "missing_date",
            Self::MissingField(TaskField::Time) => "missing_time",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidTime(_) => "invalid_time",
        }
    }
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{} is required", field.as_str()),
            Self::InvalidDate(value) => {
                write!(f, "date `{value}` must use YYYY-MM-DD format")
            }
            Self::InvalidTime(value) => write!(f, "time `{value}` must use HH:MM format"),
        }
    }
}

impl Error for TaskValidationError {}

/// Returns whether `value` is a calendar `dateString` (`YYYY-MM-DD`).
pub fn is_valid_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

/// Returns whether `value` is a 24-hour `HH:MM` time.
pub fn is_valid_time(value: &str) -> bool {
    TIME_RE.is_match(value)
}
