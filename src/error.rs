use std::{
    num::{ParseFloatError, ParseIntError},
    path::PathBuf,
};
use thiserror::Error;

pub type SvfuseResult<T> = std::result::Result<T, SvfuseError>;

#[derive(Debug, Error)]
pub enum SvfuseError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),
    #[error("Malformed {format} record: {reason}")]
    MalformedRecord { format: String, reason: String },
    #[error("Malformed record at {}:{line}: {source}", path.display())]
    InputRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<SvfuseError>,
    },
    #[error("Unknown input format: {value}")]
    UnknownInputFormat { value: String },
    #[error("Invariant violated while comparing {first} and {second}: {reason}")]
    InvariantViolation {
        first: String,
        second: String,
        reason: String,
    },
    #[error("A complex event needs at least one component")]
    EmptyComposition,
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl SvfuseError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn malformed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            format: format.into(),
            reason: reason.into(),
        }
    }
}

#[macro_export]
macro_rules! svfuse_error {
    ($($arg:tt)*) => {
        $crate::error::SvfuseError::message(format!($($arg)*))
    };
}
