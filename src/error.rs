//! Error types for running ThetaCode programs and for the workspace store.

use thiserror::Error;

/// Reasons a run stops early.
///
/// Only [`ThetaError::MalformedStatement`] can occur in the default lenient
/// mode. The other two variants are raised by strict mode alone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThetaError {
    #[error("Malformed statement at line {line}: {cause}")]
    MalformedStatement { line: usize, cause: String },

    #[error("Unrecognized statement at line {line}: {text}")]
    UnrecognizedStatement { line: usize, text: String },

    #[error("Unknown bot '{bot}' referenced at line {line}")]
    DanglingReference { line: usize, bot: String },
}

impl ThetaError {
    /// Source line the failure was reported on.
    pub fn line(&self) -> usize {
        match self {
            ThetaError::MalformedStatement { line, .. }
            | ThetaError::UnrecognizedStatement { line, .. }
            | ThetaError::DanglingReference { line, .. } => *line,
        }
    }
}

/// Workspace store errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File '{0}' not found")]
    NotFound(String),

    #[error("File '{0}' already exists")]
    AlreadyExists(String),
}
