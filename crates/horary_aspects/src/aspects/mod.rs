pub mod angles;
pub mod calculator;
pub mod classifier;
pub mod lunar;
pub mod orbs;
pub mod timing;
pub mod types;

pub use angles::{orb_from_exact, orb_rate, separation, signed_delta};
pub use calculator::AspectCalculator;
pub use classifier::{classify, is_applying, is_separating, Classification};
pub use orbs::max_orb;
pub use timing::{describe_elapsed, describe_eta, estimate_timing, TimingEstimate};
pub use types::{AspectKind, AspectObservation, LunarAspectObservation};
