use crate::ephemeris::adapter::EphemerisError;
use crate::ephemeris::types::Body;
use thiserror::Error;

/// Errors surfaced by aspect calculations
#[derive(Error, Debug)]
pub enum AspectError {
    #[error("Snapshot is missing required body: {0}")]
    MissingBody(Body),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}
