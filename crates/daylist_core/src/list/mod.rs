//! In-memory task list model.
//!
//! # Responsibility
//! - Hold the authoritative task collection for the current session.
//! - Enforce ordering and identity invariants on every mutation.
//!
//! # Invariants
//! - Nothing outside `TaskList` mutates stored tasks.
//! - Callers re-fetch snapshots after every mutation.

pub mod task_list;
