use nalgebra::{UnitQuaternion, Vector3};

/// Measured vehicle pose, orientation as a unit quaternion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self { position: Vector3::zeros(), orientation: UnitQuaternion::identity() }
    }
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self { position, orientation }
    }

    /// Heading about the vertical axis in `(-π, π]`.
    pub fn yaw(&self) -> f64 {
        let q = self.orientation.quaternion();
        let siny = 2.0 * (q.w * q.k + q.i * q.j);
        let cosy = 1.0 - 2.0 * (q.j * q.j + q.k * q.k);
        libm::atan2(siny, cosy)
    }
}

mod test {
    #[test]
    fn test_quaternion_to_yaw() {
        use core::f64::consts::PI;

        use nalgebra::{Quaternion, UnitQuaternion, Vector3};

        use super::Pose;

        let pose = |w, i, j, k| {
            let q = UnitQuaternion::new_normalize(Quaternion::new(w, i, j, k));
            Pose::new(Vector3::zeros(), q)
        };

        assert_eq!(pose(1.0, 0.0, 0.0, 0.0).yaw(), 0.0);
        assert!((pose(0.7071068, 0.0, 0.0, 0.7071068).yaw() - PI / 2.0).abs() < 1e-6);
        assert!((pose(0.7071068, 0.0, 0.0, -0.7071068).yaw() + PI / 2.0).abs() < 1e-6);
        assert!((pose(0.0, 0.0, 0.0, 1.0).yaw() - PI).abs() < 1e-6);

        // roll and pitch leave heading alone
        let q = UnitQuaternion::from_euler_angles(0.3, -0.2, 1.0);
        assert!((Pose::new(Vector3::zeros(), q).yaw() - 1.0).abs() < 1e-9);
    }
}
