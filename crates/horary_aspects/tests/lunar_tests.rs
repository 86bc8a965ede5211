use horary_aspects::aspects::{AspectCalculator, AspectKind};
use horary_aspects::config::OrbPolicyConfig;
use horary_aspects::ephemeris::{Body, ChartSnapshot, Position};
use horary_aspects::AspectError;

const JD: f64 = 2_451_545.0;

fn moon_at(longitude: f64, speed: f64) -> ChartSnapshot {
    ChartSnapshot::new(JD).with(Body::Moon, Position::new(longitude, speed))
}

#[test]
fn test_next_aspect_picks_soonest() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    let snapshot = moon_at(10.0, 13.0)
        .with(Body::Mars, Position::new(15.0, 0.5))
        .with(Body::Jupiter, Position::new(17.0, 0.1));

    let next = calculator
        .moon_next_aspect(&snapshot, |_| 13.0, false)
        .unwrap()
        .expect("applying conjunction to Mars");
    assert_eq!(next.body, Body::Mars);
    assert_eq!(next.aspect, AspectKind::Conjunction);
    assert!(next.applying);
    assert_eq!(next.orb, 5.0);
    assert!((next.eta_days - 5.0 / 12.5).abs() < 1e-12);
    assert_eq!(next.eta_description, "Within hours");
}

#[test]
fn test_next_aspect_uses_recomputed_moon_speed() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    let snapshot = moon_at(10.0, 13.0).with(Body::Mars, Position::new(15.0, 0.5));

    let next = calculator
        .moon_next_aspect(&snapshot, |jd| if jd == JD { 25.5 } else { 0.0 }, false)
        .unwrap()
        .unwrap();
    assert!((next.eta_days - 5.0 / 25.0).abs() < 1e-12);
}

#[test]
fn test_next_aspect_ignores_outer_planets() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    let snapshot = moon_at(10.0, 13.0)
        .with(Body::Uranus, Position::new(12.0, 0.05))
        .with(Body::Pluto, Position::new(14.0, 0.02));

    assert!(calculator.moon_next_aspect(&snapshot, |_| 13.0, false).unwrap().is_none());
}

#[test]
fn test_voc_flag_skips_orb_gate() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    // 20° from a conjunction with Saturn, reached in about 1.55 days, well
    // before the Moon leaves Aries
    let snapshot = moon_at(0.0, 13.0).with(Body::Saturn, Position::new(20.0, 0.1));

    assert!(calculator.moon_next_aspect(&snapshot, |_| 13.0, false).unwrap().is_none());

    let next = calculator
        .moon_next_aspect(&snapshot, |_| 13.0, true)
        .unwrap()
        .expect("conjunction perfects before sign exit");
    assert_eq!(next.body, Body::Saturn);
    assert_eq!(next.aspect, AspectKind::Conjunction);
    assert_eq!(next.eta_description, "Within 1 days");
    assert!(!calculator.is_void_of_course(&snapshot, |_| 13.0).unwrap());
}

#[test]
fn test_void_of_course_late_in_sign() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    // Two degrees left in Aries at 12°/day: about four hours
    let snapshot = moon_at(28.0, 12.0)
        .with(Body::Sun, Position::new(100.0, 1.0))
        .with(Body::Mercury, Position::new(200.0, 1.2))
        .with(Body::Saturn, Position::new(250.0, 0.05));

    assert!(calculator.moon_next_aspect(&snapshot, |_| 12.0, true).unwrap().is_none());
    assert!(calculator.is_void_of_course(&snapshot, |_| 12.0).unwrap());
}

#[test]
fn test_not_void_when_aspect_perfects_in_sign() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    let snapshot = moon_at(28.0, 12.0)
        .with(Body::Sun, Position::new(100.0, 1.0))
        .with(Body::Mars, Position::new(29.0, 0.5));

    let next = calculator.moon_next_aspect(&snapshot, |_| 12.0, true).unwrap().unwrap();
    assert_eq!(next.body, Body::Mars);
    assert!(next.eta_days < 2.0 / 12.0);
    assert!(!calculator.is_void_of_course(&snapshot, |_| 12.0).unwrap());
}

#[test]
fn test_last_aspect_most_recent_separation() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    let snapshot = moon_at(20.0, 13.0)
        .with(Body::Venus, Position::new(15.0, 1.2))
        .with(Body::Pluto, Position::new(18.0, 0.0));

    let last = calculator
        .moon_last_aspect(&snapshot, |_| 13.0)
        .unwrap()
        .expect("separating from Pluto");
    // Outer planets count when looking back
    assert_eq!(last.body, Body::Pluto);
    assert_eq!(last.aspect, AspectKind::Conjunction);
    assert!(!last.applying);
    assert!((last.eta_days - 2.0 / 13.0).abs() < 1e-12);
    assert_eq!(last.eta_description, "0.2 days ago");
}

#[test]
fn test_last_aspect_uses_widened_orb() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    // 11° past a conjunction: outside the 8° orb, inside 1.5 × 8°
    let snapshot = moon_at(26.0, 13.0).with(Body::Venus, Position::new(15.0, 1.0));
    let last = calculator.moon_last_aspect(&snapshot, |_| 13.0).unwrap().unwrap();
    assert_eq!(last.body, Body::Venus);
    assert_eq!(last.orb, 11.0);

    let snapshot = moon_at(28.0, 13.0).with(Body::Venus, Position::new(15.0, 1.0));
    assert!(calculator.moon_last_aspect(&snapshot, |_| 13.0).unwrap().is_none());
}

#[test]
fn test_last_aspect_needs_relative_motion() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    let snapshot = moon_at(20.0, 1.0).with(Body::Mars, Position::new(18.0, 1.0));
    assert!(calculator.moon_last_aspect(&snapshot, |_| 1.0).unwrap().is_none());
}

#[test]
fn test_missing_moon_fails() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    let snapshot = ChartSnapshot::new(JD).with(Body::Sun, Position::new(0.0, 1.0));
    assert!(matches!(
        calculator.moon_last_aspect(&snapshot, |_| 13.0),
        Err(AspectError::MissingBody(Body::Moon))
    ));
    assert!(calculator.is_void_of_course(&snapshot, |_| 13.0).is_err());
}

#[test]
fn test_lunar_search_is_idempotent() {
    let config = OrbPolicyConfig::default();
    let calculator = AspectCalculator::new(&config);
    let snapshot = moon_at(10.0, 13.0)
        .with(Body::Sun, Position::new(5.0, 1.0))
        .with(Body::Mars, Position::new(15.0, 0.5));

    let first = calculator.moon_aspects(&snapshot, |_| 13.0).unwrap();
    let second = calculator.moon_aspects(&snapshot, |_| 13.0).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.0.map(|a| a.body), Some(Body::Sun));
    assert_eq!(first.1.map(|a| a.body), Some(Body::Mars));
}
