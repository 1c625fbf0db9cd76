//! Error types shared across the segmentation pipeline

use std::error;
use std::fmt::{Display, Formatter};
use std::io;
use std::result;

/// Result type for operations that could result in a [SegmentError]
pub type Result<T> = result::Result<T, SegmentError>;

/// Segmentation pipeline error
#[derive(Debug)]
pub enum SegmentError {
    /// Error returned when the input table is malformed: missing or
    /// unparseable columns, non-finite values, or an empty dataset.
    Validation(String),
    /// Error returned when configuration is inconsistent with the data,
    /// e.g. more clusters than customers or a label vocabulary whose size
    /// does not match k.
    Config(String),
    /// Error associated to I/O operations and associated traits.
    Io(io::Error),
    /// Error returned when CSV reading or writing fails.
    Csv(csv::Error),
    /// Error returned when chart rendering fails.
    Plot(String),
}

impl From<io::Error> for SegmentError {
    fn from(e: io::Error) -> Self {
        SegmentError::Io(e)
    }
}

impl From<csv::Error> for SegmentError {
    fn from(e: csv::Error) -> Self {
        SegmentError::Csv(e)
    }
}

impl Display for SegmentError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            SegmentError::Validation(desc) => write!(f, "Validation error: {}", desc),
            SegmentError::Config(desc) => write!(f, "Config error: {}", desc),
            SegmentError::Io(desc) => write!(f, "IO error: {}", desc),
            SegmentError::Csv(desc) => write!(f, "CSV error: {}", desc),
            SegmentError::Plot(desc) => write!(f, "Plot error: {}", desc),
        }
    }
}

impl error::Error for SegmentError {}
