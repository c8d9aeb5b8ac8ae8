//! Task list model.
//!
//! # Responsibility
//! - Provide add/remove/toggle/query operations over session tasks.
//! - Issue task IDs from a monotonic counter.
//!
//! # Invariants
//! - Stored tasks are sorted ascending by `date`; equal dates keep insertion
//!   order (stable sort, no secondary time comparator).
//! - IDs are unique and strictly increasing for the list lifetime.
//! - A failed operation leaves the stored sequence untouched.
//! - Log lines carry IDs and counts only, never task text.

use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for task list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// Creation input failed validation; nothing was stored.
    Validation(TaskValidationError),
    /// Position does not exist in the current sequence.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid task: {err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} out of range for list of {len}")
            }
        }
    }
}

impl Error for TaskListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<TaskValidationError> for TaskListError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Result alias for task list operations.
pub type TaskListResult<T> = Result<T, TaskListError>;

/// Owned, date-ordered task collection.
///
/// Single-owner by construction: concurrent callers must serialize access
/// (see the FFI session mutex), since index-based operations race with
/// concurrent removals.
#[derive(Debug, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskList {
    /// Creates an empty list whose first issued ID is `1`.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Validates and stores one task, then re-sorts by date.
    ///
    /// # Contract
    /// - On success the list grows by exactly one and the returned task
    ///   carries the request fields unchanged with `completed = false`.
    /// - On failure the list (and the ID counter) is unchanged.
    pub fn add(&mut self, request: NewTask) -> TaskListResult<Task> {
        if let Err(err) = request.validate() {
            warn!(
                "event=task_add module=task_list status=rejected reason={} len={}",
                err.reason_code(),
                self.tasks.len()
            );
            return Err(err.into());
        }

        let id = TaskId::from_raw(self.next_id);
        self.next_id += 1;
        let task = Task::from_request(id, request);
        self.tasks.push(task.clone());
        self.tasks.sort_by(|a, b| a.date.cmp(&b.date));

        info!(
            "event=task_add module=task_list status=ok id={} has_image={} len={}",
            id,
            task.image_ref.is_some(),
            self.tasks.len()
        );
        Ok(task)
    }

    /// Removes the task at `index` and returns it.
    pub fn remove(&mut self, index: usize) -> TaskListResult<Task> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        info!(
            "event=task_remove module=task_list status=ok id={} len={}",
            removed.id,
            self.tasks.len()
        );
        Ok(removed)
    }

    /// Flips `completed` for the task at `index`.
    ///
    /// The flag is flipped in place, so the date ordering and the task's
    /// position are preserved.
    pub fn toggle_completed(&mut self, index: usize) -> TaskListResult<&Task> {
        self.check_index(index)?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        debug!(
            "event=task_toggle module=task_list status=ok id={} completed={}",
            task.id, task.completed
        );
        Ok(task)
    }

    /// Returns an owned snapshot of the current ordered sequence.
    pub fn list(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Borrows the ordered sequence without cloning.
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Resolves the current position of a task ID.
    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn check_index(&self, index: usize) -> TaskListResult<()> {
        if index < self.tasks.len() {
            return Ok(());
        }
        warn!(
            "event=task_index module=task_list status=rejected index={} len={}",
            index,
            self.tasks.len()
        );
        Err(TaskListError::IndexOutOfRange {
            index,
            len: self.tasks.len(),
        })
    }
}
