//! Time-to-exact estimates and their human-readable descriptions.

use crate::aspects::angles::{relative_speed, separation};
use crate::aspects::types::AspectKind;
use crate::ephemeris::calendar::CalendarConverter;
use crate::ephemeris::types::Position;
use chrono::{DateTime, Utc};

/// Gaps tighter than this are reported as exactly this many degrees
pub const MIN_DEGREES_TO_EXACT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct TimingEstimate {
    /// Degrees left to exact, floored at [`MIN_DEGREES_TO_EXACT`]
    pub degrees_to_exact: f64,
    /// `None` when there is no relative motion
    pub days_to_exact: Option<f64>,
    pub exact_time: Option<DateTime<Utc>>,
}

/// Estimate when an aspect perfects, assuming constant speeds.
///
/// Calendar conversion is best effort: a failure leaves `exact_time` empty.
pub fn estimate_timing(
    pos1: &Position,
    pos2: &Position,
    aspect: AspectKind,
    jd_ut: f64,
    max_future_days: f64,
    calendar: &dyn CalendarConverter,
) -> TimingEstimate {
    let orb = (separation(pos1.longitude, pos2.longitude) - aspect.degrees()).abs();
    let speed = relative_speed(pos1, pos2);

    let days_to_exact = if speed > 0.0 { Some(orb / speed) } else { None };

    let exact_time = days_to_exact
        .filter(|days| *days < max_future_days)
        .and_then(|days| match calendar.to_utc(jd_ut + days) {
            Ok(dt) => Some(dt),
            Err(e) => {
                log::warn!("Could not project {} perfection to calendar time: {}", aspect, e);
                None
            }
        });

    TimingEstimate {
        degrees_to_exact: if orb < MIN_DEGREES_TO_EXACT {
            MIN_DEGREES_TO_EXACT
        } else {
            orb
        },
        days_to_exact,
        exact_time,
    }
}

/// Bucket a forward-looking ETA into a short phrase
pub fn describe_eta(days: f64) -> String {
    if days < 0.5 {
        "Within hours".to_string()
    } else if days < 1.0 {
        "Within a day".to_string()
    } else if days < 7.0 {
        format!("Within {} days", days.floor() as u64)
    } else if days < 30.0 {
        format!("Within {} weeks", (days / 7.0).floor() as u64)
    } else if days < 365.0 {
        format!("Within {} months", (days / 30.0).floor() as u64)
    } else {
        "More than a year".to_string()
    }
}

/// Describe how long ago an aspect perfected
pub fn describe_elapsed(days: f64) -> String {
    format!("{:.1} days ago", days)
}
