//! Orb policy configuration.
//!
//! A config value is built once per calculation and handed to the
//! calculator; nothing here is global.

use crate::aspects::types::AspectKind;
use crate::ephemeris::types::Body;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Full orb (in degrees) per body; each body contributes half of it.
pub type MoietyTable = BTreeMap<Body, f64>;

/// Env var naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "HORARY_CONFIG";

const DEFAULT_CONFIG_PATHS: &[&str] = &["configs/horary.toml", "../../configs/horary.toml"];

/// Flat orbs per aspect, used by the legacy orb system and the lunar search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectOrbs {
    pub conjunction: f64,
    pub sextile: f64,
    pub square: f64,
    pub trine: f64,
    pub opposition: f64,
}

impl AspectOrbs {
    pub fn orb(&self, aspect: AspectKind) -> f64 {
        match aspect {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Sextile => self.sextile,
            AspectKind::Square => self.square,
            AspectKind::Trine => self.trine,
            AspectKind::Opposition => self.opposition,
        }
    }
}

impl Default for AspectOrbs {
    fn default() -> Self {
        Self {
            conjunction: AspectKind::Conjunction.default_orb(),
            sextile: AspectKind::Sextile.default_orb(),
            square: AspectKind::Square.default_orb(),
            trine: AspectKind::Trine.default_orb(),
            opposition: AspectKind::Opposition.default_orb(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbPolicyConfig {
    /// Per-body full orbs; `None` selects the flat legacy system
    pub moieties: Option<MoietyTable>,
    /// Added to the flat orb when the Sun is in the pair
    pub sun_orb_bonus: f64,
    /// Added to the flat orb when the Moon is in the pair
    pub moon_orb_bonus: f64,
    /// Force the flat legacy system even when moieties are configured
    pub legacy_orbs: bool,
    pub aspect_orbs: AspectOrbs,
    /// Perfections further out than this are not projected to calendar time
    pub max_future_days: f64,
}

impl Default for OrbPolicyConfig {
    fn default() -> Self {
        Self {
            moieties: Some(default_moieties()),
            sun_orb_bonus: 2.0,
            moon_orb_bonus: 1.0,
            legacy_orbs: false,
            aspect_orbs: AspectOrbs::default(),
            max_future_days: 365.0,
        }
    }
}

/// Traditional full orbs of the visible planets
pub fn default_moieties() -> MoietyTable {
    BTreeMap::from([
        (Body::Sun, 15.0),
        (Body::Moon, 12.0),
        (Body::Mercury, 7.0),
        (Body::Venus, 7.0),
        (Body::Mars, 8.0),
        (Body::Jupiter, 9.0),
        (Body::Saturn, 9.0),
    ])
}

impl OrbPolicyConfig {
    /// Defaults without a moiety table
    pub fn legacy() -> Self {
        Self {
            moieties: None,
            ..Self::default()
        }
    }

    /// Moiety table in effect, if the moiety system is enabled
    pub fn moiety_table(&self) -> Option<&MoietyTable> {
        if self.legacy_orbs {
            None
        } else {
            self.moieties.as_ref()
        }
    }

    /// Configured flat orb for an aspect
    pub fn aspect_orb(&self, aspect: AspectKind) -> f64 {
        self.aspect_orbs.orb(aspect)
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: OrbPolicyConfig =
            toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse orb policy: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.max_future_days.is_finite() && self.max_future_days > 0.0) {
            anyhow::bail!("max_future_days must be positive, got {}", self.max_future_days);
        }
        for (name, value) in [
            ("sun_orb_bonus", self.sun_orb_bonus),
            ("moon_orb_bonus", self.moon_orb_bonus),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                anyhow::bail!("{name} must be a non-negative number, got {value}");
            }
        }
        for aspect in AspectKind::ALL {
            let orb = self.aspect_orb(aspect);
            if !(orb.is_finite() && orb >= 0.0) {
                anyhow::bail!("orb for {aspect} must be a non-negative number, got {orb}");
            }
        }
        if let Some(table) = &self.moieties {
            for (body, full_orb) in table {
                if !(full_orb.is_finite() && *full_orb >= 0.0) {
                    anyhow::bail!("moiety for {body} must be a non-negative number, got {full_orb}");
                }
            }
        }
        Ok(())
    }
}

/// Resolve which config file to read: explicit path, then `HORARY_CONFIG`,
/// then the first default location that exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    DEFAULT_CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Load the orb policy, falling back to defaults when no file is found.
pub fn load_orb_policy(explicit: Option<&Path>) -> anyhow::Result<OrbPolicyConfig> {
    let Some(path) = resolve_config_path(explicit) else {
        log::info!("No orb policy file found, using defaults");
        return Ok(OrbPolicyConfig::default());
    };
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Could not read orb policy from {}", path.display()))?;
    let config = OrbPolicyConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid orb policy in {}", path.display()))?;
    log::debug!("Loaded orb policy from {}", path.display());
    Ok(config)
}
