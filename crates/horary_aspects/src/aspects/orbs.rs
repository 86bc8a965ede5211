//! Orb allowance for a pair of bodies.

use crate::aspects::types::AspectKind;
use crate::config::{MoietyTable, OrbPolicyConfig};
use crate::ephemeris::types::Body;

/// Scale applied to the combined moieties for each aspect family
fn moiety_factor(aspect: AspectKind) -> f64 {
    match aspect {
        AspectKind::Conjunction | AspectKind::Opposition => 1.0,
        AspectKind::Square | AspectKind::Trine => 0.85,
        AspectKind::Sextile => 0.7,
    }
}

/// Combined moiety orb; bodies missing from the table contribute nothing.
pub fn moiety_orb(body1: Body, body2: Body, aspect: AspectKind, table: &MoietyTable) -> f64 {
    let moiety = |body: Body| table.get(&body).copied().unwrap_or(0.0) / 2.0;
    (moiety(body1) + moiety(body2)) * moiety_factor(aspect)
}

/// Flat configured orb plus luminary bonuses
pub fn legacy_orb(body1: Body, body2: Body, aspect: AspectKind, config: &OrbPolicyConfig) -> f64 {
    let mut orb = config.aspect_orb(aspect);
    if body1 == Body::Sun || body2 == Body::Sun {
        orb += config.sun_orb_bonus;
    }
    if body1 == Body::Moon || body2 == Body::Moon {
        orb += config.moon_orb_bonus;
    }
    orb
}

/// Maximum orb allowed for `aspect` between `body1` and `body2`.
///
/// Uses the moiety system when a table is configured, and the legacy flat
/// orbs otherwise or when the moiety result comes out as zero.
pub fn max_orb(body1: Body, body2: Body, aspect: AspectKind, config: &OrbPolicyConfig) -> f64 {
    let orb = config
        .moiety_table()
        .map(|table| moiety_orb(body1, body2, aspect, table))
        .unwrap_or(0.0);
    if orb == 0.0 {
        legacy_orb(body1, body2, aspect, config)
    } else {
        orb
    }
}
