use nalgebra::Vector3;

/// Target pose, yaw in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Waypoint {
    x: f64,
    y: f64,
    z: f64,
    yaw: f64,
}

impl Waypoint {
    pub const fn new(x: f64, y: f64, z: f64, yaw: f64) -> Self {
        Self { x, y, z, yaw }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl core::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({}, {}, {}) yaw {:.3}", self.x, self.y, self.z, self.yaw)
    }
}

/// Rectangle loop at 2m height, closing back on its first corner.
pub const SAMPLE_ROUTE: [Waypoint; 5] = [
    Waypoint::new(1.0, -5.0, 2.0, 0.0),
    Waypoint::new(1.0, 5.0, 2.0, 0.0),
    Waypoint::new(2.0, 5.0, 2.0, 0.0),
    Waypoint::new(2.0, -5.0, 2.0, 0.0),
    Waypoint::new(1.0, -5.0, 2.0, 0.0),
];

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Target {
    pub position: Vector3<f64>,
    pub yaw: f64,
}

impl From<Waypoint> for Target {
    fn from(waypoint: Waypoint) -> Self {
        Self { position: waypoint.position(), yaw: waypoint.yaw }
    }
}

mod test {
    #[test]
    fn test_sample_route_is_closed() {
        use super::SAMPLE_ROUTE;

        assert_eq!(SAMPLE_ROUTE.first(), SAMPLE_ROUTE.last());
        assert!(SAMPLE_ROUTE.iter().all(|w| w.z() == 2.0 && w.yaw() == 0.0));
    }

    #[test]
    fn test_serialize_target() {
        use serde_json::json;

        use super::{Target, Waypoint};

        let target = Target::from(Waypoint::new(1.0, -5.0, 2.0, 0.5));
        let expected = json!({"position": [1.0, -5.0, 2.0], "yaw": 0.5});
        assert_eq!(expected, serde_json::to_value(&target).unwrap());
    }
}
