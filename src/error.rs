//! Error Types
//!
//! Loading, ranking, and output failures are kept apart so callers can tell
//! a bad embedding file from a bad query or a failed write.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an embedding source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file does not exist.
    #[error("embedding file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The source exists but could not be read.
    #[error("failed to read embedding source: {0}")]
    IoFailure(#[from] io::Error),

    /// A line could not be parsed. Line numbers are 1-based.
    #[error("malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

impl LoadError {
    /// Line number of a malformed record, if that is what failed
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::MalformedLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Errors raised by a similarity query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    /// The query word is not in the store.
    #[error("word not found: '{0}'")]
    WordNotFound(String),

    /// A negative result count was requested.
    #[error("invalid result count: {0} (must be zero or greater)")]
    InvalidK(i64),
}

/// Errors raised while writing a ranking to its destination.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write results to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Any failure surfaced by a [`Session`](crate::Session) operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Rank(#[from] RankError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type Result<T, E = SessionError> = std::result::Result<T, E>;
