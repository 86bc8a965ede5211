use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Celestial bodies tracked by the aspect engine.
///
/// Declaration order matters: snapshots iterate bodies in this order, which
/// fixes the order in which pairs are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Bodies the Moon may perfect an aspect with for void-of-course purposes.
    pub const CLASSICAL: [Body; 6] = [
        Body::Mercury,
        Body::Venus,
        Body::Sun,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    /// Lowercase identifier, also used as the key in moiety tables
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    pub fn from_id(id: &str) -> Option<Body> {
        let id = id.to_lowercase();
        Body::ALL.iter().copied().find(|body| body.id() == id)
    }

    /// Sun, Mercury, Venus, Mars, Jupiter or Saturn
    pub fn is_classical(self) -> bool {
        Body::CLASSICAL.contains(&self)
    }

    /// Swiss Ephemeris planet number
    pub fn swe_id(self) -> i32 {
        match self {
            Body::Sun => 0,
            Body::Moon => 1,
            Body::Mercury => 2,
            Body::Venus => 3,
            Body::Mars => 4,
            Body::Jupiter => 5,
            Body::Saturn => 6,
            Body::Uranus => 7,
            Body::Neptune => 8,
            Body::Pluto => 9,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Ecliptic position of one body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Speed in longitude (degrees per day), negative when retrograde
    pub speed: f64,
}

impl Position {
    /// Build a position, normalizing the longitude into [0, 360).
    pub fn new(longitude: f64, speed: f64) -> Self {
        Self {
            longitude: normalize_longitude(longitude),
            speed,
        }
    }
}

/// Normalize any longitude into [0, 360)
pub fn normalize_longitude(longitude: f64) -> f64 {
    let lon = longitude.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if lon >= 360.0 {
        0.0
    } else {
        lon
    }
}

/// Positions of all requested bodies at a single instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    /// Instant of observation as a Julian day (UT)
    pub jd_ut: f64,
    pub positions: BTreeMap<Body, Position>,
}

impl ChartSnapshot {
    pub fn new(jd_ut: f64) -> Self {
        Self {
            jd_ut,
            positions: BTreeMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, body: Body, position: Position) -> Self {
        self.positions.insert(body, position);
        self
    }

    pub fn insert(&mut self, body: Body, position: Position) {
        self.positions.insert(body, position);
    }

    pub fn get(&self, body: Body) -> Option<&Position> {
        self.positions.get(&body)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Body, &Position)> {
        self.positions.iter().map(|(body, pos)| (*body, pos))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
