use core::f64::consts::PI;

use nalgebra::Vector3;

pub const DEGREE_TO_RADIAN: f64 = PI / 180.0;

const TWO_PI: f64 = 2.0 * PI;

pub fn squared_distance(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let (dx, dy, dz) = (a.x - b.x, a.y - b.y, a.z - b.z);
    dx * dx + dy * dy + dz * dz
}

/// Absolute heading difference folded into `[0, 2π)`.
///
/// The difference is not reduced to the shortest arc, so headings on both
/// sides of the 0/2π seam (e.g. 355° against 0°) read as almost a full turn.
pub fn yaw_error(target: f64, actual: f64) -> f64 {
    libm::fmod(libm::fabs(target - actual) + TWO_PI, TWO_PI)
}

mod test {
    #[test]
    fn test_squared_distance() {
        use nalgebra::Vector3;

        let a = Vector3::new(1.0, -5.0, 2.0);
        let b = Vector3::new(2.0, -3.0, 0.0);
        assert_eq!(super::squared_distance(&a, &b), 9.0);
        assert_eq!(super::squared_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_yaw_error() {
        use core::f64::consts::PI;

        use super::{yaw_error, DEGREE_TO_RADIAN};

        assert!((yaw_error(0.0, 0.1) - 0.1).abs() < 1e-12);
        assert!((yaw_error(0.1, 0.0) - 0.1).abs() < 1e-12);
        assert!((yaw_error(PI, -PI)).abs() < 1e-12);
        assert!((90.0 * DEGREE_TO_RADIAN - PI / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_yaw_error_across_seam() {
        use super::{yaw_error, DEGREE_TO_RADIAN};

        // 355° against 0° is 5° apart but reads as 355°
        let error = yaw_error(355.0 * DEGREE_TO_RADIAN, 0.0);
        assert!((error - 355.0 * DEGREE_TO_RADIAN).abs() < 1e-12);

        // -10° as reported by atan2 against 350° folds onto the seam
        let error = yaw_error(350.0 * DEGREE_TO_RADIAN, -10.0 * DEGREE_TO_RADIAN);
        assert!(error < 1e-9 || (error - 360.0 * DEGREE_TO_RADIAN).abs() < 1e-9);
    }
}
