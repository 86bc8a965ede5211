use crate::ephemeris::types::Body;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traditional (Ptolemaic) aspects.
///
/// Declaration order is the priority order: when a pair fits several aspects
/// at once, the scanner credits the first one listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// All aspects in priority order
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle for this aspect
    pub fn degrees(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Flat orb used when no override is configured
    pub fn default_orb(self) -> f64 {
        match self {
            AspectKind::Sextile => 6.0,
            _ => 8.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An active aspect between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectObservation {
    pub body1: Body,
    pub body2: Body,
    pub aspect: AspectKind,
    /// Deviation from the exact angle, in degrees
    pub orb: f64,
    /// Whether the orb is shrinking
    pub applying: bool,
    /// Whether the aspect perfects before either body changes sign
    pub perfects_within_sign: bool,
    /// Predicted moment of perfection, when within the look-ahead horizon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_time: Option<DateTime<Utc>>,
    pub degrees_to_exact: f64,
}

/// An aspect of the Moon to one other body, looking backward or forward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarAspectObservation {
    pub body: Body,
    pub aspect: AspectKind,
    pub orb: f64,
    /// Degrees since (separating) or until (applying) exact
    pub degrees_difference: f64,
    /// Days since or until exact; infinite without relative motion
    pub eta_days: f64,
    pub eta_description: String,
    pub applying: bool,
}
