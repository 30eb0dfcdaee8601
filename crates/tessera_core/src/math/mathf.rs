//! Scalar helpers and constants shared with scripts.

pub const EPSILON: f32 = 0.000_001;

/// Distance the engine treats as "no limit" for casts.
pub const INFINITY: f32 = 340_282_300_000.0;

pub const PI: f32 = std::f32::consts::PI;
pub const TO_RAD: f32 = PI / 180.0;
pub const TO_DEG: f32 = 180.0 / PI;

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics; with `min > max` the upper bound wins.
#[must_use]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

#[must_use]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[must_use]
pub fn ceil_to_int(value: f32) -> i32 {
    value.ceil() as i32
}

#[must_use]
pub fn floor_to_int(value: f32) -> i32 {
    value.floor() as i32
}
