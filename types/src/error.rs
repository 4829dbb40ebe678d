//! Error type shared across crates.

use thiserror::Error;

/// Errors raised while parsing the fundamental types.
#[derive(Debug, Error)]
pub enum DaoError {
    #[error("invalid member address: {0}")]
    InvalidAddress(String),
}
