use std::{io, path::PathBuf};

use thiserror::Error;

use crate::sim::JobId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("round robin requires a time quantum")]
    MissingQuantum,

    #[error("invalid time quantum {0}: must be a positive integer")]
    InvalidQuantum(i64),

    #[error("memory capacity must allow at least one job")]
    ZeroCapacity,

    #[error("I/O duration must be positive")]
    ZeroIoTime,
}

/// Problems with a single job record line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("arrival time {0} exceeds the signed 64-bit tick range")]
    ArrivalOutOfRange(u64),

    #[error("job must have at least one burst")]
    NoBursts,

    #[error("burst {index} has zero length")]
    ZeroBurst { index: usize },

    #[error("expected {expected} bursts, found {found}")]
    BurstCountMismatch { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("duplicate job id {0}")]
    DuplicateJob(JobId),

    #[error("failed to read job file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("job feed error: {0}")]
    Feed(#[from] FeedError),
}
