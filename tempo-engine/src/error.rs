//! Tempo engine error type.

use std::error;
use std::fmt::{self, Display};
use std::result;

/// Tempo engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// A list specifying general errors for the tempo engine.
/// The search itself cannot fail for a well-formed position; errors only
/// arise on the host edges, such as position setup and driver input.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A FEN string could not be parsed into a position.
    Fen,
    /// A driver-provided argument could not be parsed.
    BadArgument,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Fen => "fen malformed",
            ErrorKind::BadArgument => "bad argument",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and general error type for the tempo engine.
#[derive(Debug)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
    Custom(ErrorKind, Box<dyn error::Error + Send + Sync>),
}

impl Error {
    pub fn new<E>(error_kind: ErrorKind, inner_error: E) -> Self
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Self::Custom(error_kind, inner_error.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => {
                write!(f, "{error_kind}")
            }
            Error::Message(error_kind, string) => {
                write!(f, "{error_kind}: {string}")
            }
            Error::Custom(error_kind, ref box_error) => {
                write!(f, "{error_kind}, error: {}", *box_error)
            }
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_displays_its_kind() {
        let err = Error::from(ErrorKind::Fen);
        assert_eq!(err.to_string(), "fen malformed");
    }

    #[test]
    fn message_displays_kind_and_detail() {
        let err = Error::from((ErrorKind::BadArgument, "movetime"));
        assert_eq!(err.to_string(), "bad argument: movetime");
    }

    #[test]
    fn custom_wraps_a_source_error() {
        let parse_err = "x".parse::<u64>().unwrap_err();
        let err = Error::new(ErrorKind::BadArgument, parse_err);
        assert!(err.to_string().starts_with("bad argument"));
    }
}
