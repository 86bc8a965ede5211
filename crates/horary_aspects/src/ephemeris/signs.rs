//! Zodiac sign boundaries and sign-exit timing.

use crate::ephemeris::types::normalize_longitude;

const SIGN_WIDTH: f64 = 30.0;

const SIGN_NAMES: &[&str] = &[
    "aries", "taurus", "gemini", "cancer",
    "leo", "virgo", "libra", "scorpio",
    "sagittarius", "capricorn", "aquarius", "pisces",
];

/// Get sign name from longitude
pub fn sign_name(longitude: f64) -> &'static str {
    let idx = (normalize_longitude(longitude) / SIGN_WIDTH).floor() as usize;
    SIGN_NAMES[idx % 12]
}

/// Estimates how long a body stays in its current sign.
pub trait SignExitEstimator {
    /// Days until a body at `longitude` moving at `speed` deg/day crosses the
    /// far boundary of its sign, or `None` when it is stationary or retreating
    /// from that boundary.
    fn days_to_sign_exit(&self, longitude: f64, speed: f64) -> Option<f64>;
}

/// Tropical 30° signs.
///
/// Only direct motion is bounded; a retrograde body never reaches the next
/// boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZodiacSignExit;

impl SignExitEstimator for ZodiacSignExit {
    fn days_to_sign_exit(&self, longitude: f64, speed: f64) -> Option<f64> {
        days_to_sign_exit(longitude, speed)
    }
}

/// Free-function form of [`ZodiacSignExit`]
pub fn days_to_sign_exit(longitude: f64, speed: f64) -> Option<f64> {
    if speed <= 0.0 || !speed.is_finite() {
        return None;
    }
    let lon = normalize_longitude(longitude);
    let sign_end = (lon / SIGN_WIDTH).floor() * SIGN_WIDTH + SIGN_WIDTH;
    Some((sign_end - lon) / speed)
}
