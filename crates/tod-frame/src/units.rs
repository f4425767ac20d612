//! Fixed unit convention for frame values.
//!
//! Quantities are stored multiplied by the constant of their unit, so a
//! value in seconds becomes `seconds * SECOND` ticks. Angles are stored in
//! radians and temperatures in kelvin.

use std::f64::consts::PI;

/// One second, in 10 ns time ticks.
pub const SECOND: f64 = 1e8;
/// One millisecond, in time ticks.
pub const MS: f64 = SECOND / 1e3;
/// One microsecond, in time ticks.
pub const US: f64 = SECOND / 1e6;
/// One nanosecond, in time ticks.
pub const NS: f64 = SECOND / 1e9;

/// One radian.
pub const RAD: f64 = 1.0;
/// One degree, in radians.
pub const DEG: f64 = PI / 180.0;
/// One arcminute, in radians.
pub const ARCMIN: f64 = DEG / 60.0;

/// One kelvin.
pub const K: f64 = 1.0;
/// One millikelvin.
pub const MK: f64 = K / 1e3;
/// One microkelvin.
pub const UK: f64 = K / 1e6;
