use core::str::FromStr;

use crate::math::DEGREE_TO_RADIAN;
use crate::types::Waypoint;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ParseError {
    MissingField,
    ExtraField,
    NotANumber,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let err_string = match self {
            Self::MissingField => "Expect 4 fields x,y,z,yaw",
            Self::ExtraField => "Too many fields",
            Self::NotANumber => "Field not a number",
        };
        write!(f, "{}", err_string)
    }
}

/// Parses `x,y,z,yaw` with yaw in degrees.
impl FromStr for Waypoint {
    type Err = ParseError;

    fn from_str(record: &str) -> Result<Self, ParseError> {
        let mut fields = record.split(',').map(str::trim);
        let mut values = [0.0f64; 4];
        for value in values.iter_mut() {
            let field = fields.next().ok_or(ParseError::MissingField)?;
            *value = field.parse().map_err(|_| ParseError::NotANumber)?;
        }
        if fields.next().is_some() {
            return Err(ParseError::ExtraField);
        }
        let [x, y, z, yaw] = values;
        Ok(Waypoint::new(x, y, z, yaw * DEGREE_TO_RADIAN))
    }
}

/// Yields waypoints line by line until input ends or a record fails to parse,
/// blank lines skipped.
pub struct Records<'a> {
    lines: core::iter::Enumerate<core::str::Lines<'a>>,
    error: Option<(usize, ParseError)>,
}

impl<'a> Records<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { lines: source.lines().enumerate(), error: None }
    }

    /// Line number and reason of the record that halted ingestion
    pub fn error(&self) -> Option<(usize, ParseError)> {
        self.error
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Waypoint;

    fn next(&mut self) -> Option<Waypoint> {
        if self.error.is_some() {
            return None;
        }
        for (index, line) in self.lines.by_ref() {
            if line.trim().is_empty() {
                continue;
            }
            return match line.parse() {
                Ok(waypoint) => Some(waypoint),
                Err(e) => {
                    self.error = Some((index + 1, e));
                    None
                }
            };
        }
        None
    }
}

mod test {
    #[test]
    fn test_parse_waypoint() {
        use core::f64::consts::PI;

        use super::ParseError;
        use crate::types::Waypoint;

        let waypoint: Waypoint = "1,2,3,90".parse().unwrap();
        assert_eq!((waypoint.x(), waypoint.y(), waypoint.z()), (1.0, 2.0, 3.0));
        assert!((waypoint.yaw() - PI / 2.0).abs() < 1e-9);

        let waypoint: Waypoint = " -1.5, 0 ,2.25,-180 \r".parse().unwrap();
        assert_eq!(waypoint.position(), nalgebra::Vector3::new(-1.5, 0.0, 2.25));
        assert!((waypoint.yaw() + PI).abs() < 1e-9);

        assert_eq!("1,2,3".parse::<Waypoint>(), Err(ParseError::MissingField));
        assert_eq!("1,2,3,4,5".parse::<Waypoint>(), Err(ParseError::ExtraField));
        assert_eq!("1;2;3;4".parse::<Waypoint>(), Err(ParseError::NotANumber));
        assert_eq!("1,2,x,4".parse::<Waypoint>(), Err(ParseError::NotANumber));
    }

    #[test]
    fn test_records_stop_at_malformed() {
        use super::{ParseError, Records};
        use crate::types::Waypoint;

        let source = "0,0,1,0\n\n1,0,1,0\n1,0\n2,0,1,0\n";
        let mut records = Records::new(source);
        let waypoints: Vec<Waypoint> = records.by_ref().collect();
        assert_eq!(waypoints, vec![Waypoint::new(0.0, 0.0, 1.0, 0.0), Waypoint::new(1.0, 0.0, 1.0, 0.0)]);
        assert_eq!(records.error(), Some((4, ParseError::MissingField)));
        assert_eq!(records.next(), None);

        let mut records = Records::new("0,0,1,0\nbroken\n2,0,1,0\n");
        assert_eq!(records.by_ref().count(), 1);
        assert_eq!(records.error(), Some((2, ParseError::NotANumber)));
    }

    #[test]
    fn test_records_trailing_newline() {
        use super::Records;

        let mut records = Records::new("0,0,1,0\n1,0,1,0\n\n");
        assert_eq!(records.by_ref().count(), 2);
        assert_eq!(records.error(), None);
        assert_eq!(Records::new("").count(), 0);
    }
}
