use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by feature building and clustering.
/// These are caller bugs (bad dimensions, bad parameters) and are never swallowed.
#[derive(Debug, Error, PartialEq)]
pub enum ClusterError {
    #[error("input lengths differ: acuity={acuity}, coords={coords}, discharge={discharge}")]
    DimensionMismatch {
        acuity: usize,
        coords: usize,
        discharge: usize,
    },

    #[error("number of clusters must be at least 1 (got {0})")]
    InvalidClusterCount(usize),

    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("no rooms to cluster")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid layout json in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} has no data", .0.display())]
    EmptyFile(PathBuf),

    #[error("room table is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("malformed room table line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("room '{0}' has no coordinate in the layout")]
    UnknownRoom(String),

    #[error(transparent)]
    Rooms(#[from] ClusterError),
}
