//! Error types for the spell checking core.
//!
//! The engine itself only fails in a handful of ways. Glue code around it
//! (configuration, the wordlist cache, the CLI) uses `anyhow` and attaches
//! context instead.

use thiserror::Error;

/// Errors produced by the dictionary index, the suggestion engine and the
/// checker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No words are loaded. Not fatal: every token simply reports invalid.
    #[error("dictionary is empty, every word will be reported as misspelled")]
    EmptyDictionary,

    /// A single wordlist record could not be used and was skipped.
    #[error("malformed wordlist entry on line {line}: {reason}")]
    MalformedWordlistEntry { line: usize, reason: String },

    /// The BK-tree is in an inconsistent state. Aborts the current call.
    #[error("suggestion search failed: {0}")]
    InternalSearchFailure(String),

    /// A region passed to the checker is out of bounds or does not fall on
    /// character boundaries.
    #[error("region {start}..{end} is not a valid slice of a {len}-byte text")]
    InvalidRegion { start: usize, end: usize, len: usize },
}

impl Error {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedWordlistEntry {
            line,
            reason: reason.into(),
        }
    }

    pub fn search_failure(reason: impl Into<String>) -> Self {
        Error::InternalSearchFailure(reason.into())
    }

    /// Whether the caller should surface this as a warning and keep going.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Error::InternalSearchFailure(_) | Error::InvalidRegion { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
