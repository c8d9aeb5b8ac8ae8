//! Device-API contracts consumed by the presentation layer.
//!
//! # Responsibility
//! - Describe picker/permission/sensor results as plain Rust values.
//! - Keep platform SDK calls out of core; the mobile shell performs them and
//!   passes the outcomes in.
//!
//! # Invariants
//! - Every async device request resolves to exactly one outcome value.
//! - Denied permissions surface as `DeviceError`, never as panics.

pub mod picker;
pub mod sensors;
