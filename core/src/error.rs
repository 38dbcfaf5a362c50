//! Per-query path errors. Both kinds are recoverable: the query driver turns
//! them into an empty path and moves on to the next query.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("no path from {from} to {to}")]
    NoPath { from: String, to: String },
}

pub type Result<T, E = PathError> = std::result::Result<T, E>;
