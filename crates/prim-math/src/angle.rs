//! Degree/radian conversion.
//!
//! Panel fields and serialized parameter sets always carry degrees; formulas
//! take radians. Dividing by 180 first keeps the common boundaries exact:
//! 0 maps to 0, 180 to `PI` and 360 to `TAU` with no rounding error.

use std::f64::consts::PI;

/// Convert degrees to radians.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees / 180.0 * PI
}

/// Convert radians to degrees.
pub fn rad_to_deg(radians: f64) -> f64 {
    radians / PI * 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    #[test]
    fn test_boundaries_are_exact() {
        assert_eq!(deg_to_rad(0.0), 0.0);
        assert_eq!(deg_to_rad(90.0), FRAC_PI_2);
        assert_eq!(deg_to_rad(180.0), PI);
        assert_eq!(deg_to_rad(360.0), TAU);
    }

    #[test]
    fn test_round_trip() {
        for deg in [0.0, 12.5, 45.0, 90.0, 180.0, 270.0, 360.0] {
            approx::assert_relative_eq!(rad_to_deg(deg_to_rad(deg)), deg, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_monotonic_over_panel_range() {
        let mut prev = -1.0;
        for step in 0..=360 {
            let rad = deg_to_rad(step as f64);
            assert!(rad > prev);
            assert!((0.0..=TAU).contains(&rad));
            prev = rad;
        }
    }
}
