//! Error types for stream extraction.

use thiserror::Error;
use workload_types::OperationKind;

/// Errors raised while extracting records from generator output.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// IO error while reading the stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation line with fewer columns than its kind requires.
    #[error("line {line}: {kind} record has {found} columns, expected at least {expected}")]
    MissingColumns {
        line: usize,
        kind: OperationKind,
        found: usize,
        expected: usize,
    },

    /// Key column that is not a tag followed by an unsigned integer.
    #[error("line {line}: malformed key '{key}'")]
    MalformedKey { line: usize, key: String },

    /// SCAN length column that is not an unsigned integer.
    #[error("line {line}: malformed scan length '{value}'")]
    MalformedScanCount { line: usize, value: String },
}

impl ExtractError {
    /// Attach a 1-based line number to an error produced by [`crate::parse_line`].
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            ExtractError::Io(e) => ExtractError::Io(e),
            ExtractError::MissingColumns {
                kind,
                found,
                expected,
                ..
            } => ExtractError::MissingColumns {
                line,
                kind,
                found,
                expected,
            },
            ExtractError::MalformedKey { key, .. } => ExtractError::MalformedKey { line, key },
            ExtractError::MalformedScanCount { value, .. } => {
                ExtractError::MalformedScanCount { line, value }
            }
        }
    }
}
