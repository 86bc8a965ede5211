use crate::aspects::angles::orb_from_exact;
use crate::aspects::classifier::{classify, Classification};
use crate::aspects::orbs::max_orb;
use crate::aspects::timing::estimate_timing;
use crate::aspects::types::{AspectKind, AspectObservation};
use crate::config::OrbPolicyConfig;
use crate::ephemeris::calendar::{CalendarConverter, JulianCalendar};
use crate::ephemeris::signs::{SignExitEstimator, ZodiacSignExit};
use crate::ephemeris::types::{Body, ChartSnapshot, Position};

/// Aspect calculator.
///
/// Holds the orb policy and the two collaborators (calendar conversion and
/// sign-exit timing) for one calculation. It keeps no other state, so the same
/// inputs always produce the same output.
pub struct AspectCalculator<'a> {
    pub(crate) config: &'a OrbPolicyConfig,
    pub(crate) calendar: &'a dyn CalendarConverter,
    pub(crate) sign_exit: &'a dyn SignExitEstimator,
}

impl<'a> AspectCalculator<'a> {
    /// Create a calculator using chrono calendar conversion and 30° signs
    pub fn new(config: &'a OrbPolicyConfig) -> Self {
        Self {
            config,
            calendar: &JulianCalendar,
            sign_exit: &ZodiacSignExit,
        }
    }

    pub fn with_calendar(mut self, calendar: &'a dyn CalendarConverter) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_sign_exit(mut self, sign_exit: &'a dyn SignExitEstimator) -> Self {
        self.sign_exit = sign_exit;
        self
    }

    pub fn config(&self) -> &OrbPolicyConfig {
        self.config
    }

    /// Compute the active aspect, if any, for every pair in the snapshot.
    ///
    /// Pairs are visited in snapshot order and each pair is credited with at
    /// most one aspect.
    pub fn compute_aspects(&self, snapshot: &ChartSnapshot) -> Vec<AspectObservation> {
        let bodies: Vec<(Body, &Position)> = snapshot.iter().collect();
        let mut aspects = Vec::new();

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (body1, pos1) = bodies[i];
                let (body2, pos2) = bodies[j];
                if let Some(aspect) = self.calculate_aspect(body1, pos1, body2, pos2, snapshot.jd_ut) {
                    aspects.push(aspect);
                }
            }
        }

        log::debug!(
            "Found {} aspects among {} bodies at JD {}",
            aspects.len(),
            bodies.len(),
            snapshot.jd_ut
        );
        aspects
    }

    /// Aspect between two bodies.
    ///
    /// Aspect kinds are tried in [`AspectKind::ALL`] order and the first one
    /// within orb wins, even when a later kind would fit more tightly.
    pub fn calculate_aspect(
        &self,
        body1: Body,
        pos1: &Position,
        body2: Body,
        pos2: &Position,
        jd_ut: f64,
    ) -> Option<AspectObservation> {
        let (aspect, orb) = AspectKind::ALL.iter().find_map(|&aspect| {
            let orb = orb_from_exact(pos1.longitude, pos2.longitude, aspect);
            (orb <= max_orb(body1, body2, aspect, self.config)).then_some((aspect, orb))
        })?;

        let Classification {
            applying,
            perfects_within_sign,
        } = classify(pos1, pos2, aspect, self.sign_exit);
        let timing = estimate_timing(
            pos1,
            pos2,
            aspect,
            jd_ut,
            self.config.max_future_days,
            self.calendar,
        );

        log::debug!(
            "{} {} {} orb {:.2} ({})",
            body1,
            aspect,
            body2,
            orb,
            if applying { "applying" } else { "separating" }
        );

        Some(AspectObservation {
            body1,
            body2,
            aspect,
            orb,
            applying,
            perfects_within_sign,
            // Only an aspect that will actually perfect gets a projected time
            exact_time: timing.exact_time.filter(|_| applying && perfects_within_sign),
            degrees_to_exact: timing.degrees_to_exact,
        })
    }
}
