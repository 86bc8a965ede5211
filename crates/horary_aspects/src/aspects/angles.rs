//! Signed longitude arithmetic shared by every aspect component.

use crate::aspects::types::AspectKind;
use crate::ephemeris::types::Position;

/// Wrap an angle into (-180, 180]
pub fn normalize_signed(angle: f64) -> f64 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Signed shortest angular path from `lon_b` to `lon_a`, in (-180, 180].
pub fn signed_delta(lon_a: f64, lon_b: f64) -> f64 {
    normalize_signed(lon_a - lon_b)
}

/// Unsigned angular separation in [0, 180]
pub fn separation(lon_a: f64, lon_b: f64) -> f64 {
    signed_delta(lon_a, lon_b).abs()
}

/// Degrees between the current separation and the aspect's exact angle.
pub fn orb_from_exact(lon_a: f64, lon_b: f64, aspect: AspectKind) -> f64 {
    let orb = (separation(lon_a, lon_b) - aspect.degrees()).abs();
    if orb > 180.0 {
        360.0 - orb
    } else {
        orb
    }
}

/// Signed change in orb per day.
///
/// Negative while the gap to exactness is shrinking (applying), positive while
/// it grows (separating), zero without relative motion.
pub fn orb_rate(pos_a: &Position, pos_b: &Position, aspect: AspectKind) -> f64 {
    let diff = normalize_signed(signed_delta(pos_a.longitude, pos_b.longitude) - aspect.degrees());
    diff * (pos_a.speed - pos_b.speed)
}

/// Absolute difference in speed (deg/day)
pub fn relative_speed(pos_a: &Position, pos_b: &Position) -> f64 {
    (pos_a.speed - pos_b.speed).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_delta_basic() {
        assert_eq!(signed_delta(10.0, 350.0), 20.0);
        assert_eq!(signed_delta(350.0, 10.0), -20.0);
        assert_eq!(signed_delta(100.0, 40.0), 60.0);
    }

    #[test]
    fn test_signed_delta_half_turn_is_positive() {
        assert_eq!(signed_delta(180.0, 0.0), 180.0);
        assert_eq!(signed_delta(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_signed_delta_antisymmetric_and_bounded() {
        let mut a = 0.0;
        while a < 360.0 {
            let mut b = 0.5;
            while b < 360.0 {
                let d = signed_delta(a, b);
                assert!(d > -180.0 && d <= 180.0, "{} out of range for {} {}", d, a, b);
                if d != 180.0 {
                    assert!((d + signed_delta(b, a)).abs() < 1e-9);
                }
                b += 17.25;
            }
            a += 13.5;
        }
    }

    #[test]
    fn test_orb_from_exact() {
        assert_eq!(orb_from_exact(100.0, 40.0, AspectKind::Sextile), 0.0);
        assert_eq!(orb_from_exact(5.0, 355.0, AspectKind::Conjunction), 10.0);
        assert_eq!(orb_from_exact(0.0, 178.0, AspectKind::Opposition), 2.0);
    }

    #[test]
    fn test_orb_rate_sign() {
        // Moon 5° behind Sun, catching up
        let moon = Position::new(95.0, 13.0);
        let sun = Position::new(100.0, 1.0);
        assert!(orb_rate(&moon, &sun, AspectKind::Conjunction) < 0.0);

        // Moon 5° past Sun, pulling away
        let moon = Position::new(105.0, 13.0);
        assert!(orb_rate(&moon, &sun, AspectKind::Conjunction) > 0.0);

        let still = Position::new(105.0, 1.0);
        assert_eq!(orb_rate(&still, &sun, AspectKind::Conjunction), 0.0);
    }
}
