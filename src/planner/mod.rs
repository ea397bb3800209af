pub mod route;

use alloc::collections::VecDeque;

use crate::config::Tolerance;
use crate::math::{squared_distance, yaw_error};
use crate::types::{waypoint::SAMPLE_ROUTE, Pose, Target, Waypoint};

use route::Records;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// No usable waypoint set loaded
    Invalid,
    /// Waypoints loaded, first one not yet reached
    Starting,
    Running,
    Finished,
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let string = match self {
            Self::Invalid => "invalid",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Finished => "finished",
        };
        write!(f, "{}", string)
    }
}

/// Sequences through waypoints, front of queue being the current target.
pub struct Planner {
    yaw_max_error: f64,
    position_max_error_squared: f64,
    waypoints: VecDeque<Waypoint>,
    status: Status,
}

impl Default for Planner {
    fn default() -> Self {
        Self::with_tolerance(Tolerance::default())
    }
}

impl Planner {
    pub fn new(yaw_max_error: f64, position_max_error: f64) -> Self {
        Self {
            yaw_max_error,
            position_max_error_squared: position_max_error * position_max_error,
            waypoints: SAMPLE_ROUTE.iter().copied().collect(),
            status: Status::Starting,
        }
    }

    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self::new(tolerance.yaw_max_error, tolerance.position_max_error)
    }

    /// Replaces current waypoints with records parsed from `source`,
    /// ingestion stops at first malformed record.
    pub fn load_waypoints(&mut self, source: &str) -> bool {
        self.waypoints.clear();
        self.status = Status::Invalid;

        let mut records = Records::new(source);
        self.waypoints.extend(records.by_ref());
        if let Some((line, error)) = records.error() {
            warn!("Waypoint record at line {} malformed: {}", line, error);
        }
        if self.waypoints.is_empty() {
            warn!("No waypoint loaded");
            return false;
        }
        info!("Loaded {} waypoints", self.waypoints.len());
        self.status = Status::Starting;
        true
    }

    #[cfg(feature = "std")]
    pub fn load_waypoints_from_file<P: AsRef<std::path::Path>>(&mut self, path: P) -> bool {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(source) => self.load_waypoints(&source),
            Err(e) => {
                self.waypoints.clear();
                self.status = Status::Invalid;
                warn!("Read waypoint file {} failed: {}", path.as_ref().display(), e);
                false
            }
        }
    }

    pub fn current_target(&self) -> Option<Target> {
        self.waypoints.front().map(|&waypoint| waypoint.into())
    }

    /// Advances to next waypoint when current one is reached, returns true only
    /// when a new target becomes active.
    pub fn step(&mut self, pose: &Pose) -> bool {
        if self.status == Status::Finished || !self.reached(pose) {
            return false;
        }

        if let Some(waypoint) = self.waypoints.pop_front() {
            debug!("Reached waypoint {}", waypoint);
        }
        if self.waypoints.is_empty() {
            info!("All waypoints reached");
            self.status = Status::Finished;
            return false;
        }
        self.status = Status::Running;
        true
    }

    pub fn reached(&self, pose: &Pose) -> bool {
        let waypoint = match self.waypoints.front() {
            Some(waypoint) => waypoint,
            None => return true,
        };
        let position_error_squared = squared_distance(&pose.position, &waypoint.position());
        let yaw_error = yaw_error(waypoint.yaw(), pose.yaw());
        position_error_squared < self.position_max_error_squared && yaw_error < self.yaw_max_error
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn remaining(&self) -> usize {
        self.waypoints.len()
    }
}

mod test {
    #[test]
    fn test_invalid_step_finishes() {
        use super::{Planner, Status};
        use crate::types::Pose;

        let mut planner = Planner::default();
        assert!(!planner.load_waypoints(""));
        assert_eq!(planner.status(), Status::Invalid);
        assert!(!planner.step(&Pose::default()));
        assert_eq!(planner.status(), Status::Finished);
        assert!(!planner.step(&Pose::default()));
        assert_eq!(planner.status(), Status::Finished);
    }

    #[test]
    fn test_default_route() {
        use nalgebra::UnitQuaternion;

        use super::{Planner, Status};
        use crate::types::{Pose, Target};

        let pose_at = |target: Target| {
            Pose::new(target.position, UnitQuaternion::from_euler_angles(0.0, 0.0, target.yaw))
        };

        let mut planner = Planner::default();
        assert_eq!(planner.status(), Status::Starting);
        assert_eq!(planner.remaining(), 5);

        let mut advanced = Vec::new();
        while let Some(target) = planner.current_target() {
            advanced.push(planner.step(&pose_at(target)));
        }
        assert_eq!(advanced, vec![true, true, true, true, false]);
        assert_eq!(planner.status(), Status::Finished);
        assert_eq!(planner.current_target(), None);
    }

    #[test]
    fn test_status_transitions() {
        use nalgebra::{UnitQuaternion, Vector3};

        use super::{Planner, Status};
        use crate::types::Pose;

        let pose = |x: f64, y: f64, z: f64, yaw: f64| {
            Pose::new(Vector3::new(x, y, z), UnitQuaternion::from_euler_angles(0.0, 0.0, yaw))
        };

        let mut planner = Planner::default();
        let far = pose(100.0, 100.0, 100.0, 0.0);
        assert!(!planner.step(&far));
        assert_eq!(planner.status(), Status::Starting);

        assert!(planner.step(&pose(1.0, -5.0, 2.0, 0.0)));
        assert_eq!(planner.status(), Status::Running);
        assert!(!planner.step(&far));
        assert_eq!(planner.status(), Status::Running);

        assert!(planner.load_waypoints("0,0,0,0\n"));
        assert_eq!(planner.status(), Status::Starting);
        assert!(!planner.step(&pose(0.0, 0.0, 0.0, 0.0)));
        assert_eq!(planner.status(), Status::Finished);
    }

    #[test]
    fn test_finished_is_terminal() {
        use nalgebra::{UnitQuaternion, Vector3};

        use super::{Planner, Status};
        use crate::types::Pose;

        let pose = |x: f64, y: f64, z: f64, yaw: f64| {
            Pose::new(Vector3::new(x, y, z), UnitQuaternion::from_euler_angles(0.0, 0.0, yaw))
        };

        let mut planner = Planner::default();
        assert!(planner.load_waypoints("0,0,0,0"));
        let origin = pose(0.0, 0.0, 0.0, 0.0);
        assert!(!planner.step(&origin));
        assert_eq!(planner.status(), Status::Finished);
        assert!(planner.reached(&origin));
        for _ in 0..10 {
            assert!(!planner.step(&origin));
            assert_eq!(planner.status(), Status::Finished);
            assert_eq!(planner.remaining(), 0);
        }
    }

    #[test]
    fn test_monotonic_consumption() {
        use nalgebra::{UnitQuaternion, Vector3};

        use super::Planner;
        use crate::types::Pose;

        let pose = |x: f64, y: f64, z: f64, yaw: f64| {
            Pose::new(Vector3::new(x, y, z), UnitQuaternion::from_euler_angles(0.0, 0.0, yaw))
        };

        let mut planner = Planner::default();
        let poses = [
            pose(1.0, -5.0, 2.0, 0.0),
            pose(1.0, -5.0, 2.0, 0.0),
            pose(1.0, 4.0, 2.0, 0.0),
            pose(30.0, 0.0, 0.0, 0.0),
            pose(2.0, 5.0, 2.0, 1.0),
            pose(2.0, 5.0, 2.0, 0.05),
        ];
        let mut remaining = planner.remaining();
        for pose in poses.iter() {
            let reached = planner.reached(pose);
            planner.step(pose);
            let expected = if reached { remaining - 1 } else { remaining };
            assert_eq!(planner.remaining(), expected);
            remaining = planner.remaining();
        }
        assert_eq!(remaining, 2);
    }

    #[test]
    fn test_load_replaces_waypoints() {
        use core::f64::consts::PI;

        use nalgebra::Vector3;

        use super::{Planner, Status};
        use crate::types::Target;

        let mut planner = Planner::default();
        assert!(planner.load_waypoints("1,2,3,90\n4,5,6,0\n"));
        assert_eq!(planner.status(), Status::Starting);
        assert_eq!(planner.remaining(), 2);
        let target = planner.current_target().unwrap();
        assert_eq!(target.position, Vector3::new(1.0, 2.0, 3.0));
        assert!((target.yaw - PI / 2.0).abs() < 1e-9);

        assert!(planner.load_waypoints("7,8,9,0"));
        let target = planner.current_target().unwrap();
        assert_eq!(target, Target { position: Vector3::new(7.0, 8.0, 9.0), yaw: 0.0 });
        assert_eq!(planner.remaining(), 1);
    }

    #[test]
    fn test_load_truncates_at_malformed_record() {
        use super::Planner;

        let mut planner = Planner::default();
        assert!(planner.load_waypoints("1,2,3,0\n4,5,6\n7,8,9,0\n"));
        assert_eq!(planner.remaining(), 1);
    }

    #[test]
    fn test_failed_load_invalidates() {
        use super::{Planner, Status};
        use crate::types::Pose;

        for source in ["", "\n\n", "x,y,z,yaw\n1,2,3,4", "1,2,3"].iter() {
            let mut planner = Planner::default();
            assert!(planner.load_waypoints("1,2,3,0"));
            assert!(!planner.load_waypoints(source));
            assert_eq!(planner.status(), Status::Invalid);
            assert_eq!(planner.current_target(), None);
            assert_eq!(planner.remaining(), 0);

            // nothing left to pursue
            assert!(!planner.step(&Pose::default()));
            assert_eq!(planner.status(), Status::Finished);
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_load_from_file() {
        use super::{Planner, Status};

        let path = std::env::temp_dir().join("waypoint-planner-test-load.csv");
        std::fs::write(&path, "1,-5,2,0\n1,5,2,180\n").unwrap();
        let mut planner = Planner::default();
        assert!(planner.load_waypoints_from_file(&path));
        assert_eq!(planner.remaining(), 2);
        std::fs::remove_file(&path).unwrap();

        assert!(!planner.load_waypoints_from_file(&path));
        assert_eq!(planner.status(), Status::Invalid);
        assert_eq!(planner.remaining(), 0);
    }

    #[test]
    fn test_threshold_boundary() {
        use nalgebra::{UnitQuaternion, Vector3};

        use super::Planner;
        use crate::types::Pose;

        let pose = |x: f64, y: f64, z: f64, yaw: f64| {
            Pose::new(Vector3::new(x, y, z), UnitQuaternion::from_euler_angles(0.0, 0.0, yaw))
        };

        let mut planner = Planner::new(0.2, 2.0);
        assert!(planner.load_waypoints("0,0,0,0"));

        assert!(planner.reached(&pose(1.999, 0.0, 0.0, 0.19)));
        assert!(planner.reached(&pose(0.0, 0.0, -1.999, -0.19)));
        assert!(!planner.reached(&pose(2.001, 0.0, 0.0, 0.0)));
        assert!(!planner.reached(&pose(2.0, 0.0, 0.0, 0.0)));
        assert!(!planner.reached(&pose(0.0, 0.0, 0.0, 0.21)));
    }

    /// Headings are not compared along the shortest arc: a waypoint at 355°
    /// is not reached by a vehicle heading 0° even though they are 5° apart.
    #[test]
    fn test_yaw_wrap_around_limitation() {
        use nalgebra::{UnitQuaternion, Vector3};

        use super::Planner;
        use crate::types::Pose;

        let pose = |x: f64, y: f64, z: f64, yaw: f64| {
            Pose::new(Vector3::new(x, y, z), UnitQuaternion::from_euler_angles(0.0, 0.0, yaw))
        };

        let mut planner = Planner::new(0.2, 2.0);
        assert!(planner.load_waypoints("0,0,0,355\n"));
        assert!(!planner.reached(&pose(0.0, 0.0, 0.0, 0.0)));

        assert!(planner.load_waypoints("0,0,0,-5\n"));
        assert!(planner.reached(&pose(0.0, 0.0, 0.0, 0.0)));
    }
}
