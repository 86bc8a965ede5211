//! Aspect engine for horary charts.
//!
//! Given a snapshot of body positions and speeds, finds the aspects in effect
//! between every pair of bodies, whether they are applying or separating and
//! when they perfect, plus the Moon's last and next aspects and its
//! void-of-course state.

pub mod aspects;
pub mod config;
pub mod ephemeris;
pub mod error;

pub use aspects::{AspectCalculator, AspectKind, AspectObservation, LunarAspectObservation};
pub use config::{load_orb_policy, OrbPolicyConfig};
pub use ephemeris::{Body, ChartSnapshot, Position};
pub use error::AspectError;
