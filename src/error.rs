/*
 * Error Module
 *
 * Errors raised by the simulation core. Failures here are either fatal at
 * start-up (configuration, worker pool) or cause a single tick to be skipped.
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::boid::BoidId;

#[derive(Debug, Error)]
pub enum SimError {
    /// A vector was divided by a zero scalar.
    #[error("attempted to divide a vector by zero")]
    DivideByZero,

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to read configuration from {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The grid was asked to move a handle out of a bucket that does not hold it.
    #[error("boid {id:?} is not in bucket {cell:?}")]
    NotInBucket { id: BoidId, cell: (usize, usize) },

    #[error("boid {0:?} is missing from the arena")]
    MissingBoid(BoidId),

    #[error("shared world lock was poisoned by a panicking worker")]
    LockPoisoned,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("display initialisation failed: {0}")]
    DisplayInit(String),
}

pub type SimResult<T> = Result<T, SimError>;
