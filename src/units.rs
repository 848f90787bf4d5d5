//! Units - Conversions and wheel math
//!
//! Shared helpers for speed units and the wheel/needle collaborators.

use std::f32::consts::PI;

/// Converts km/h to m/s.
pub fn kmh_to_ms(kmh: f32) -> f32 {
    kmh / 3.6
}

/// Converts m/s to km/h.
pub fn ms_to_kmh(ms: f32) -> f32 {
    ms * 3.6
}

/// Rotation angle (degrees) a wheel of `radius` meters turns while
/// covering `speed * dt` meters.
pub fn wheel_rotation_angle(speed: f32, dt: f32, radius: f32) -> f32 {
    let circumference = 2.0 * PI * radius;
    (speed * dt) / circumference * 360.0
}

/// Normalizes `value` within [min, max] to [0, 1].
pub fn normalize(value: f32, min: f32, max: f32) -> f32 {
    (value - min) / (max - min)
}
