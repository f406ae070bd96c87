//! Core error type.
//!
//! `rn-graph` wraps `RnError` as one variant of its own error enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RnError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `rn-core`.
pub type RnResult<T> = Result<T, RnError>;
