//! Minimal error set for core-domain parsing/validation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid voter code: {0}")]
    InvalidVoterCode(String),

    #[error("invalid ballot filename: {0}")]
    InvalidFilename(String),
}
