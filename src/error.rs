//! Error types for index operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("model artifact unreadable: {0}")]
    ArtifactIo(#[from] std::io::Error),

    #[error("model artifact malformed at line {line}: {reason}")]
    ArtifactFormat { line: usize, reason: String },

    #[error("model artifact inconsistent: {0}")]
    ArtifactSchema(String),
}

pub type Result<T> = std::result::Result<T, Error>;
