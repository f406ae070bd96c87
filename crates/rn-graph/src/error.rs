//! Graph-subsystem error type.

use thiserror::Error;

use rn_core::{Coordinate, RnError};

/// Errors produced by `rn-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("intersection {0} not found in network")]
    IntersectionNotFound(Coordinate),

    #[error("no block connects {from} to {to}")]
    NoConnectingBlock { from: Coordinate, to: Coordinate },

    #[error("invalid block {street:?} #{block}: {reason}")]
    InvalidBlock {
        street: String,
        block:  u32,
        reason: String,
    },

    #[error("too many {0} for 32-bit ids")]
    IdOverflow(&'static str),

    #[error("map parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Core(#[from] RnError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
