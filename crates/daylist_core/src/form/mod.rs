//! Task entry form state.
//!
//! # Responsibility
//! - Hold in-progress field values between picker callbacks.
//! - Turn picker outcomes into validated field strings.
//!
//! # Invariants
//! - The form never mutates the task list; the session submits it.
//! - `clear()` is only called after a successful add.

pub mod task_form;
