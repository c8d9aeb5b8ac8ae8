//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record rendered by the task list screen.
//! - Own field-level validation for task creation requests.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` issued by the owning list.
//! - Tasks are never default-constructed or partially populated.

pub mod task;
