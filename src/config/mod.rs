pub mod pathset;

use pathset::{Error, Path, PathSet, Value};

pub const DEFAULT_YAW_MAX_ERROR: f64 = 0.2;
pub const DEFAULT_POSITION_MAX_ERROR: f64 = 2.0;

/// How close the vehicle must get before a waypoint counts as reached.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Tolerance {
    /// Radians
    pub yaw_max_error: f64,
    pub position_max_error: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { yaw_max_error: DEFAULT_YAW_MAX_ERROR, position_max_error: DEFAULT_POSITION_MAX_ERROR }
    }
}

fn non_negative(value: Value) -> Result<f64, Error> {
    let v: f64 = value.parse()?;
    if !(v >= 0.0) || v.is_infinite() {
        return Err(Error::InvalidValue);
    }
    Ok(v)
}

impl PathSet for Tolerance {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        match path.str()? {
            "yaw-max-error" => self.yaw_max_error = non_negative(value)?,
            "position-max-error" => self.position_max_error = non_negative(value)?,
            _ => return Err(Error::UnknownPath),
        }
        Ok(())
    }
}

mod test {
    #[test]
    fn test_tolerance_assign() {
        use super::pathset::{Error, PathSet};
        use super::Tolerance;

        let mut tolerance = Tolerance::default();
        tolerance.assign("yaw-max-error=0.35").unwrap();
        tolerance.assign("position-max-error = 1.5").unwrap();
        assert_eq!(tolerance, Tolerance { yaw_max_error: 0.35, position_max_error: 1.5 });

        assert_eq!(tolerance.assign("altitude=1"), Err(Error::UnknownPath));
        assert_eq!(tolerance.assign("yaw-max-error"), Err(Error::ExpectValue));
        assert_eq!(tolerance.assign("yaw-max-error=-1"), Err(Error::InvalidValue));
        assert_eq!(tolerance.assign("position-max-error=NaN"), Err(Error::InvalidValue));
        assert_eq!(tolerance, Tolerance { yaw_max_error: 0.35, position_max_error: 1.5 });
    }

    #[test]
    fn test_deserialize_tolerance() {
        use super::Tolerance;

        let json = r#"{"yaw-max-error": 0.1, "position-max-error": 0.5}"#;
        let tolerance: Tolerance = serde_json::from_str(json).unwrap();
        assert_eq!(tolerance, Tolerance { yaw_max_error: 0.1, position_max_error: 0.5 });
    }
}
