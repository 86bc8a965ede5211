//! Julian day and civil time conversion.

use crate::ephemeris::adapter::EphemerisError;
use chrono::{DateTime, Timelike, Utc};

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts a fractional Julian day into a civil UTC timestamp.
pub trait CalendarConverter {
    fn to_utc(&self, jd_ut: f64) -> Result<DateTime<Utc>, EphemerisError>;
}

/// Proleptic Gregorian conversion done entirely with chrono.
///
/// Results are truncated to whole minutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JulianCalendar;

impl CalendarConverter for JulianCalendar {
    fn to_utc(&self, jd_ut: f64) -> Result<DateTime<Utc>, EphemerisError> {
        julian_day_to_datetime(jd_ut)
    }
}

/// Convert UTC datetime to Julian Day
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Convert Julian Day to UTC datetime, truncated to the minute
pub fn julian_day_to_datetime(jd: f64) -> Result<DateTime<Utc>, EphemerisError> {
    if !jd.is_finite() {
        return Err(EphemerisError::InvalidJulianDay { jd });
    }
    // Round to the millisecond before truncating to the minute
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
    if millis.abs() > i64::MAX as f64 / 2.0 {
        return Err(EphemerisError::DateOutOfRange { jd });
    }
    let millis = millis as i64;
    DateTime::from_timestamp(millis.div_euclid(1000), 0)
        .and_then(|dt| dt.with_second(0))
        .ok_or(EphemerisError::DateOutOfRange { jd })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_j2000_epoch() {
        let dt = julian_day_to_datetime(2_451_545.0).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_truncates_to_minute() {
        // 2000-01-01 12:30:45
        let jd = 2_451_545.0 + (30.0 * 60.0 + 45.0) / SECONDS_PER_DAY;
        let dt = julian_day_to_datetime(jd).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2000, 1, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_datetime_to_julian_day() {
        let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(datetime_to_julian_day(dt), UNIX_EPOCH_JD);
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((datetime_to_julian_day(dt) - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_finite_and_out_of_range() {
        assert!(matches!(
            julian_day_to_datetime(f64::NAN),
            Err(EphemerisError::InvalidJulianDay { .. })
        ));
        assert!(matches!(
            julian_day_to_datetime(1.0e12),
            Err(EphemerisError::DateOutOfRange { .. })
        ));
    }
}
