use crate::ephemeris::calendar::{datetime_to_julian_day, CalendarConverter};
use crate::ephemeris::types::{Body, ChartSnapshot, Position};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, revjul};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed { body: Body, jd: f64, message: String },
    #[error("Invalid Julian day: {jd}")]
    InvalidJulianDay { jd: f64 },
    #[error("Julian day {jd} is outside the supported calendar range")]
    DateOutOfRange { jd: f64 },
}

/// FLG_SWIEPH (2) | FLG_SPEED (256)
const DEFAULT_FLAGS: u32 = 2 | 256;

/// Swiss Ephemeris backed position provider
pub struct SwissEphemerisAdapter {
    _ephemeris_path: PathBuf,
    flags: u32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        log::debug!("Using Swiss Ephemeris data at {}", path.display());

        Ok(Self {
            _ephemeris_path: path,
            flags: DEFAULT_FLAGS,
        })
    }

    /// Positions of `bodies` at `dt_utc`
    pub fn snapshot(
        &self,
        dt_utc: DateTime<Utc>,
        bodies: &[Body],
    ) -> Result<ChartSnapshot, EphemerisError> {
        let jd = datetime_to_julian_day(dt_utc);
        let mut snapshot = ChartSnapshot::new(jd);
        for &body in bodies {
            snapshot.insert(body, self.calc_position(body, jd)?);
        }
        Ok(snapshot)
    }

    /// Calculate position for a single body
    pub fn calc_position(&self, body: Body, jd: f64) -> Result<Position, EphemerisError> {
        if !jd.is_finite() {
            return Err(EphemerisError::InvalidJulianDay { jd });
        }
        let result = calc_ut(jd, body.swe_id() as u32, self.flags).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(Position::new(out[0], out[3]))
    }

    /// Instantaneous lunar speed (deg/day) at `jd`
    pub fn moon_speed(&self, jd: f64) -> Result<f64, EphemerisError> {
        self.calc_position(Body::Moon, jd).map(|pos| pos.speed)
    }
}

impl CalendarConverter for SwissEphemerisAdapter {
    fn to_utc(&self, jd_ut: f64) -> Result<DateTime<Utc>, EphemerisError> {
        if !jd_ut.is_finite() {
            return Err(EphemerisError::InvalidJulianDay { jd: jd_ut });
        }
        // GREG_CAL = 1
        let (year, month, day, hour_decimal) = revjul(jd_ut, 1);
        civil_to_utc(year, month as u32, day as u32, hour_decimal)
            .ok_or(EphemerisError::DateOutOfRange { jd: jd_ut })
    }
}

/// Calendar date plus decimal hours, truncated to the minute.
///
/// A time that rounds up to 24:00 rolls over to the next day.
fn civil_to_utc(year: i32, month: u32, day: u32, hour_decimal: f64) -> Option<DateTime<Utc>> {
    let minutes = (hour_decimal * 60.0 + 1e-6).floor() as i64;
    let midnight = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()?;
    midnight.checked_add_signed(Duration::minutes(minutes))
}
