use std::io;
use trackable::error::TrackableError;
use trackable::error::{ErrorKind as TrackableErrorKind, ErrorKindExt};

/// The error type for this crate.
#[derive(Debug, Clone, trackable::TrackableError)]
pub struct Error(TrackableError<ErrorKind>);
impl From<io::Error> for Error {
    fn from(f: io::Error) -> Self {
        ErrorKind::Other.cause(f).into()
    }
}
impl From<log::SetLoggerError> for Error {
    fn from(f: log::SetLoggerError) -> Self {
        ErrorKind::Other.cause(f).into()
    }
}
impl From<Error> for io::Error {
    fn from(f: Error) -> Self {
        let kind = match *f.kind() {
            ErrorKind::Invalid => io::ErrorKind::InvalidInput,
            ErrorKind::Closed => io::ErrorKind::BrokenPipe,
            ErrorKind::Other => io::ErrorKind::Other,
        };
        io::Error::new(kind, f)
    }
}

/// A list of error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input (priority strings, facility codes, destinations).
    Invalid,

    /// The logger was used after it had been closed.
    Closed,

    /// Unknown error, typically an I/O failure of the underlying sink.
    Other,
}
impl TrackableErrorKind for ErrorKind {}
