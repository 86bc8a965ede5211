pub mod adapter;
pub mod calendar;
pub mod signs;
pub mod types;

pub use adapter::{EphemerisError, SwissEphemerisAdapter};
pub use calendar::{datetime_to_julian_day, julian_day_to_datetime, CalendarConverter, JulianCalendar};
pub use signs::{days_to_sign_exit, sign_name, SignExitEstimator, ZodiacSignExit};
pub use types::{normalize_longitude, Body, ChartSnapshot, Position};
