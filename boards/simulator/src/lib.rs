#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use waypoint_planner::config::{pathset::PathSet, Tolerance};
use waypoint_planner::types::{Pose, Target};
use waypoint_planner::{Planner, Status};

/// One pose sample per line, orientation as `[w, x, y, z]`.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct PoseSample {
    pub position: [f64; 3],
    pub orientation: [f64; 4],
}

impl From<PoseSample> for Pose {
    fn from(sample: PoseSample) -> Self {
        let [x, y, z] = sample.position;
        let [w, i, j, k] = sample.orientation;
        let orientation = UnitQuaternion::new_normalize(Quaternion::new(w, i, j, k));
        Pose::new(Vector3::new(x, y, z), orientation)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Telemetry {
    pub status: Status,
    pub remaining: usize,
    pub target: Option<Target>,
}

pub struct Simulator {
    planner: Planner,
    status: Status,
}

impl Simulator {
    pub fn new(planner: Planner) -> Self {
        let status = planner.status();
        Self { planner, status }
    }

    /// Applies tolerance overrides then loads `waypoints` if given,
    /// sample route otherwise.
    pub fn setup<'a, I>(waypoints: Option<&str>, assignments: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tolerance = Tolerance::default();
        for assignment in assignments {
            tolerance.assign(assignment).map_err(|e| format!("Set {} failed: {}", assignment, e))?;
        }
        let mut planner = Planner::with_tolerance(tolerance);
        if let Some(path) = waypoints {
            if !planner.load_waypoints_from_file(path) {
                return Err(format!("Load waypoints from {} failed", path));
            }
        }
        Ok(Self::new(planner))
    }

    pub fn update_pose(&mut self, sample: PoseSample) -> Telemetry {
        let pose = Pose::from(sample);
        if self.planner.step(&pose) {
            trace!("Target advanced, {} remaining", self.planner.remaining());
        }
        let status = self.planner.status();
        if status != self.status {
            info!("Planner {} -> {}", self.status, status);
            self.status = status;
        }
        self.get_telemetry()
    }

    pub fn get_telemetry(&self) -> Telemetry {
        Telemetry {
            status: self.planner.status(),
            remaining: self.planner.remaining(),
            target: self.planner.current_target(),
        }
    }
}

mod test {
    #[test]
    fn test_update_pose() {
        use waypoint_planner::{Planner, Status};

        use super::{PoseSample, Simulator};

        let mut planner = Planner::default();
        assert!(planner.load_waypoints("0,0,1,0\n5,0,1,90\n"));
        let mut simulator = Simulator::new(planner);

        let sample: PoseSample =
            serde_json::from_str(r#"{"position":[0.5,0,1],"orientation":[1,0,0,0]}"#).unwrap();
        let telemetry = simulator.update_pose(sample);
        assert_eq!(telemetry.status, Status::Running);
        assert_eq!(telemetry.remaining, 1);

        let half = core::f64::consts::FRAC_1_SQRT_2;
        let sample = PoseSample { position: [5.0, 0.0, 1.0], orientation: [half, 0.0, 0.0, half] };
        let telemetry = simulator.update_pose(sample);
        assert_eq!(telemetry.status, Status::Finished);
        assert_eq!(telemetry.target, None);
        let expected = serde_json::json!({"status": "finished", "remaining": 0, "target": null});
        assert_eq!(serde_json::to_value(&telemetry).unwrap(), expected);
    }

    #[test]
    fn test_setup_errors() {
        use super::Simulator;

        let result = Simulator::setup(None, vec!["heading=1"]);
        assert_eq!(result.err().unwrap(), "Set heading=1 failed: Specified path not exists or invalid");

        let path = std::env::temp_dir().join("simulator-test-missing-waypoints.csv");
        let path = path.to_str().unwrap();
        let result = Simulator::setup(Some(path), vec!["yaw-max-error=0.3"]);
        assert_eq!(result.err().unwrap(), format!("Load waypoints from {} failed", path));

        let simulator = Simulator::setup(None, Vec::new()).unwrap();
        assert_eq!(simulator.get_telemetry().remaining, 5);
    }
}
