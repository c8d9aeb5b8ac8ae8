//! Use-case session orchestration.
//!
//! # Responsibility
//! - Own the task list, entry form and push token for one app session.
//! - Run the add-then-notify protocol as two explicit steps.
//!
//! # See also
//! - `crate::notify` for the dispatch collaborator.

pub mod task_session;
