use core::str::{FromStr, Split};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    UnknownPath,
    ExpectValue,
    InvalidValue,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let err_string = match self {
            Self::UnknownPath => "Specified path not exists or invalid",
            Self::ExpectValue => "Expect value",
            Self::InvalidValue => "Value not valid",
        };
        write!(f, "{}", err_string)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Value<'a>(pub Option<&'a str>);

impl<'a> Value<'a> {
    pub fn of(string: &'a str) -> Value<'a> {
        Value(Some(string))
    }

    pub fn parse<T: FromStr>(&self) -> Result<T, Error> {
        match self.0.map(str::trim) {
            Some("") | None => Err(Error::ExpectValue),
            Some(s) => T::from_str(s).map_err(|_| Error::InvalidValue),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Path<'a>(Split<'a, char>);

impl<'a> Path<'a> {
    pub fn new(split: Split<'a, char>) -> Self {
        Self(split)
    }

    pub fn str(&mut self) -> Result<&'a str, Error> {
        self.0.next().map(str::trim).ok_or(Error::UnknownPath)
    }
}

pub trait PathSet {
    fn set(&mut self, path: Path, value: Value) -> Result<(), Error>;

    /// Applies an assignment of form `some.path=value`
    fn assign(&mut self, assignment: &str) -> Result<(), Error> {
        let (path, value) = match assignment.split_once('=') {
            Some((path, value)) => (path, Value::of(value)),
            None => (assignment, Value(None)),
        };
        self.set(Path::new(path.split('.')), value)
    }
}

mod test {
    #[test]
    fn test_value_parse() {
        use super::{Error, Value};

        assert_eq!(Value::of(" 0.5 ").parse::<f64>(), Ok(0.5));
        assert_eq!(Value::of("abc").parse::<f64>(), Err(Error::InvalidValue));
        assert_eq!(Value::of("").parse::<f64>(), Err(Error::ExpectValue));
        assert_eq!(Value(None).parse::<f64>(), Err(Error::ExpectValue));
    }
}
