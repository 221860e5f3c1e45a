//! Error types. One `thiserror`-derived enum per fallible subsystem,
//! following the same split the rest of this crate's ancestry uses:
//! leaf errors carry enough context to print a precise diagnostic, and
//! a top-level error wraps them via `#[from]` so `main` only has to
//! match once.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArgsError {
    #[error("--lower-bound and --upper-bound must be given together")]
    PartialBounds,
    #[error("no bounds given; expected two integers on stdin, got none")]
    MissingInteractiveBounds,
    #[error("could not parse '{0}' as an integer")]
    NotAnInteger(String),
    #[error("thread count must be at least 1")]
    ZeroThreads,
}

#[derive(Error, Debug)]
pub enum IntervalError {
    #[error("lower bound {min} is greater than upper bound {max}")]
    Inverted { min: u64, max: u64 },
}

#[derive(Error, Debug)]
pub enum CheckpointError {
    #[error("checkpoint file {0} already exists")]
    AlreadyExists(PathBuf),
    #[error("could not read checkpoint file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write checkpoint file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("checkpoint {path} line {line}: malformed token '{token}'")]
    Malformed {
        path: PathBuf,
        line: usize,
        token: String,
    },
    #[error("checkpoint {path} line {line}: bounds {min} {max} do not match requested interval {requested_min} {requested_max}")]
    BoundsMismatch {
        path: PathBuf,
        line: usize,
        min: u64,
        max: u64,
        requested_min: u64,
        requested_max: u64,
    },
    #[error("checkpoint {path} line {line}: count column {column} decreased from a previous line")]
    NonMonotonic {
        path: PathBuf,
        line: usize,
        column: usize,
    },
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error(transparent)]
    Interval(#[from] IntervalError),
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

impl DriverError {
    /// Process exit code for this failure. Every kind in the error
    /// table exits 1; the `Display` message is what distinguishes them
    /// for the user.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
