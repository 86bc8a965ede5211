//! The Moon's most recent and next aspects, and void-of-course.

use crate::aspects::angles::orb_from_exact;
use crate::aspects::calculator::AspectCalculator;
use crate::aspects::classifier::{classify, is_separating};
use crate::aspects::timing::{describe_elapsed, describe_eta};
use crate::aspects::types::{AspectKind, LunarAspectObservation};
use crate::ephemeris::signs::sign_name;
use crate::ephemeris::types::{Body, ChartSnapshot, Position};
use crate::error::AspectError;

/// Window multiplier on the configured orb when looking for past aspects
pub const SEPARATING_ORB_FACTOR: f64 = 1.5;

/// Days to cover `degrees` at `relative_speed`, infinite without motion
fn days_for(degrees: f64, relative_speed: f64) -> f64 {
    if relative_speed != 0.0 {
        degrees / relative_speed.abs()
    } else {
        f64::INFINITY
    }
}

/// Smallest ETA, keeping the earliest candidate on ties
fn soonest(candidates: Vec<LunarAspectObservation>) -> Option<LunarAspectObservation> {
    candidates.into_iter().reduce(|best, candidate| {
        if candidate.eta_days < best.eta_days {
            candidate
        } else {
            best
        }
    })
}

impl<'a> AspectCalculator<'a> {
    fn moon_position(&self, snapshot: &ChartSnapshot) -> Result<Position, AspectError> {
        snapshot
            .get(Body::Moon)
            .copied()
            .ok_or(AspectError::MissingBody(Body::Moon))
    }

    /// The Moon's most recent separating aspect to any other body.
    ///
    /// `moon_speed` returns the Moon's speed (deg/day) at a Julian day and is
    /// used for the elapsed-time estimate.
    pub fn moon_last_aspect<F>(
        &self,
        snapshot: &ChartSnapshot,
        moon_speed: F,
    ) -> Result<Option<LunarAspectObservation>, AspectError>
    where
        F: Fn(f64) -> f64,
    {
        let moon = self.moon_position(snapshot)?;
        let speed = moon_speed(snapshot.jd_ut);
        let mut candidates = Vec::new();

        for (body, pos) in snapshot.iter() {
            if body == Body::Moon {
                continue;
            }
            for aspect in AspectKind::ALL {
                let orb = orb_from_exact(moon.longitude, pos.longitude, aspect);
                if orb > self.config.aspect_orb(aspect) * SEPARATING_ORB_FACTOR {
                    continue;
                }
                if !is_separating(&moon, pos, aspect, self.sign_exit) {
                    continue;
                }
                let days_since = days_for(orb, speed - pos.speed);
                log::trace!("Moon separating from {} {} ({:.2} days)", aspect, body, days_since);
                candidates.push(LunarAspectObservation {
                    body,
                    aspect,
                    orb,
                    degrees_difference: orb,
                    eta_days: days_since,
                    eta_description: describe_elapsed(days_since),
                    applying: false,
                });
            }
        }

        let last = soonest(candidates);
        if let Some(last) = &last {
            log::debug!("Moon last aspect: {} {} ({})", last.aspect, last.body, last.eta_description);
        }
        Ok(last)
    }

    /// The Moon's next applying aspect to a classical body that perfects
    /// before the Moon leaves its sign.
    ///
    /// With `ignore_orb_for_voc` set, candidates are not required to be within
    /// orb yet; the void-of-course check needs every applying aspect that
    /// perfects in sign, however distant it is now.
    pub fn moon_next_aspect<F>(
        &self,
        snapshot: &ChartSnapshot,
        moon_speed: F,
        ignore_orb_for_voc: bool,
    ) -> Result<Option<LunarAspectObservation>, AspectError>
    where
        F: Fn(f64) -> f64,
    {
        let moon = self.moon_position(snapshot)?;
        let speed = moon_speed(snapshot.jd_ut);
        let moon_days_to_exit = self.sign_exit.days_to_sign_exit(moon.longitude, speed);
        let mut candidates = Vec::new();

        for (body, pos) in snapshot.iter() {
            if !body.is_classical() {
                continue;
            }
            for aspect in AspectKind::ALL {
                let orb = orb_from_exact(moon.longitude, pos.longitude, aspect);
                if !ignore_orb_for_voc && orb > self.config.aspect_orb(aspect) {
                    continue;
                }
                let classification = classify(&moon, pos, aspect, self.sign_exit);
                if !classification.applying {
                    continue;
                }
                let days_to_exact = days_for(orb, speed - pos.speed);
                let leaves_sign_first = moon_days_to_exit.is_some_and(|exit| days_to_exact > exit);
                if leaves_sign_first || !classification.perfects_within_sign {
                    log::trace!(
                        "Moon {} {} perfects out of sign ({:.2} days)",
                        aspect,
                        body,
                        days_to_exact
                    );
                    continue;
                }
                candidates.push(LunarAspectObservation {
                    body,
                    aspect,
                    orb,
                    degrees_difference: orb,
                    eta_days: days_to_exact,
                    eta_description: describe_eta(days_to_exact),
                    applying: true,
                });
            }
        }

        let next = soonest(candidates);
        match &next {
            Some(next) => log::debug!(
                "Moon next aspect: {} {} ({})",
                next.aspect,
                next.body,
                next.eta_description
            ),
            None => log::debug!(
                "Moon has no applying aspect before leaving {}",
                sign_name(moon.longitude)
            ),
        }
        Ok(next)
    }

    /// True when the Moon perfects no applying aspect to a classical body
    /// before it changes sign.
    pub fn is_void_of_course<F>(&self, snapshot: &ChartSnapshot, moon_speed: F) -> Result<bool, AspectError>
    where
        F: Fn(f64) -> f64,
    {
        Ok(self.moon_next_aspect(snapshot, moon_speed, true)?.is_none())
    }

    /// Last separating and next applying lunar aspects, in display orbs
    pub fn moon_aspects<F>(
        &self,
        snapshot: &ChartSnapshot,
        moon_speed: F,
    ) -> Result<(Option<LunarAspectObservation>, Option<LunarAspectObservation>), AspectError>
    where
        F: Fn(f64) -> f64,
    {
        let last = self.moon_last_aspect(snapshot, &moon_speed)?;
        let next = self.moon_next_aspect(snapshot, &moon_speed, false)?;
        Ok((last, next))
    }
}
