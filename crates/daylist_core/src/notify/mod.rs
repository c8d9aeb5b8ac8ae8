//! Push notification dispatch.
//!
//! # Responsibility
//! - Build push-relay payloads from created tasks.
//! - Send them through a swappable async dispatcher.
//!
//! # Invariants
//! - Dispatch runs only after a committed add; its outcome never rolls the
//!   task back.
//! - A missing destination token skips dispatch instead of failing.

pub mod dispatcher;
pub mod message;
