//! Error types for key remapping.

use crate::remapper::Phase;
use thiserror::Error;
use workload_types::{KeySpace, OperationKind};
use ycsb_extract::ExtractError;

/// Errors that abort a workload.
#[derive(Error, Debug)]
pub enum RemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generator output could not be parsed.
    #[error("Malformed generator output: {0}")]
    Extract(#[from] ExtractError),

    /// A READ/UPDATE/SCAN referenced a key that was never inserted.
    #[error("{kind} references key {key} which was never inserted")]
    UnmappedKey { kind: OperationKind, key: u64 },

    /// The load stream carried something other than an INSERT.
    #[error("Load stream may only contain INSERT records, found {kind} of key {key}")]
    UnexpectedLoadOperation { kind: OperationKind, key: u64 },

    /// Sampling index past the end of the corpus.
    #[error("Corpus exhausted: index {index} requested but corpus has {len} entries")]
    CorpusExhausted { index: usize, len: usize },

    /// Corpus smaller than the number of load inserts (sampling stride of zero).
    #[error("Corpus has {len} entries, not enough for {inserts} load inserts")]
    CorpusTooSmall { len: usize, inserts: usize },

    /// Email policy with no load inserts to derive a stride from.
    #[error("Load stream has no INSERT records, cannot derive corpus sampling stride")]
    EmptyLoadStream,

    /// Policy needs a corpus but none was supplied.
    #[error("Key type '{0}' requires a corpus source")]
    MissingCorpus(KeySpace),

    /// Remapper driven out of order.
    #[error("Invalid remapper phase: expected {expected:?}, found {actual:?}")]
    InvalidPhase { expected: Phase, actual: Phase },
}
