//! Applying/separating classification and sign-bounded perfection.

use crate::aspects::angles::{orb_from_exact, orb_rate, relative_speed};
use crate::aspects::types::AspectKind;
use crate::ephemeris::signs::SignExitEstimator;
use crate::ephemeris::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The gap to exactness is shrinking
    pub applying: bool,
    /// Perfection comes before either body leaves its sign
    pub perfects_within_sign: bool,
}

/// Classify one aspect between two positions.
pub fn classify(
    pos1: &Position,
    pos2: &Position,
    aspect: AspectKind,
    sign_exit: &dyn SignExitEstimator,
) -> Classification {
    let current_orb = orb_from_exact(pos1.longitude, pos2.longitude, aspect);
    Classification {
        applying: orb_rate(pos1, pos2, aspect) < 0.0,
        perfects_within_sign: perfects_before_sign_exit(pos1, pos2, current_orb, sign_exit),
    }
}

/// Whether an aspect `current_orb` degrees from exact perfects before either
/// body exits its current sign.
pub fn perfects_before_sign_exit(
    pos1: &Position,
    pos2: &Position,
    current_orb: f64,
    sign_exit: &dyn SignExitEstimator,
) -> bool {
    let speed = relative_speed(pos1, pos2);
    if speed == 0.0 {
        return false;
    }
    let days_to_perfect = current_orb / speed;

    [pos1, pos2].iter().all(|pos| {
        match sign_exit.days_to_sign_exit(pos.longitude, pos.speed) {
            Some(days_to_exit) => days_to_perfect <= days_to_exit,
            None => true,
        }
    })
}

pub fn is_applying(
    pos1: &Position,
    pos2: &Position,
    aspect: AspectKind,
    sign_exit: &dyn SignExitEstimator,
) -> bool {
    classify(pos1, pos2, aspect, sign_exit).applying
}

/// Not applying, and the orb is actually growing.
///
/// "Not applying" alone would also hold with no relative motion at all.
pub fn is_separating(
    pos1: &Position,
    pos2: &Position,
    aspect: AspectKind,
    sign_exit: &dyn SignExitEstimator,
) -> bool {
    !is_applying(pos1, pos2, aspect, sign_exit) && orb_rate(pos1, pos2, aspect) > 0.0
}
