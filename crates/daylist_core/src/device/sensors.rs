//! Motion sensor readings shown on the task screen.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Update interval the shell requests from magnetometer and gyroscope.
pub const SENSOR_UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// Converts a magnetometer `(x, y)` reading into a compass heading.
///
/// Result is in degrees within `[0, 360)`.
pub fn compass_heading(x: f64, y: f64) -> f64 {
    let heading = y.atan2(x).to_degrees();
    let wrapped = if heading >= 0.0 { heading } else { 360.0 + heading };
    // atan2 of a tiny negative y can round to exactly 360.0.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Latest gyroscope sample (rad/s per axis).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GyroscopeReading {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
