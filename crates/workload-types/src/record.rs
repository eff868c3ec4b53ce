//! Normalized operation records.

use std::fmt;

/// Operation kinds emitted by the benchmark generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Insert,
    Read,
    Update,
    Scan,
}

impl OperationKind {
    /// All kinds, in the order they are reported in metrics.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Insert,
        OperationKind::Read,
        OperationKind::Update,
        OperationKind::Scan,
    ];

    /// The token used for this kind in generator output and in output files.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Insert => "INSERT",
            OperationKind::Read => "READ",
            OperationKind::Update => "UPDATE",
            OperationKind::Scan => "SCAN",
        }
    }

    /// Parse a column-0 token. Returns `None` for anything that is not an operation.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "INSERT" => Some(OperationKind::Insert),
            "READ" => Some(OperationKind::Read),
            "UPDATE" => Some(OperationKind::Update),
            "SCAN" => Some(OperationKind::Scan),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The generator phase a stream of records belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// `ycsb load` output. Only inserts are kept.
    Load,
    /// `ycsb run` output. All four kinds are kept.
    Transaction,
}

impl Stream {
    /// Whether records of `kind` are part of this stream.
    pub fn retains(&self, kind: OperationKind) -> bool {
        match self {
            Stream::Load => kind == OperationKind::Insert,
            Stream::Transaction => true,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Load => f.write_str("load"),
            Stream::Transaction => f.write_str("txn"),
        }
    }
}

/// One operation with the numeric key assigned by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub kind: OperationKind,
    pub key: u64,
    /// Only present for [`OperationKind::Scan`]. Kept as the generator wrote it.
    pub scan_count: Option<String>,
}

impl OperationRecord {
    pub fn insert(key: u64) -> Self {
        Self {
            kind: OperationKind::Insert,
            key,
            scan_count: None,
        }
    }

    pub fn read(key: u64) -> Self {
        Self {
            kind: OperationKind::Read,
            key,
            scan_count: None,
        }
    }

    pub fn update(key: u64) -> Self {
        Self {
            kind: OperationKind::Update,
            key,
            scan_count: None,
        }
    }

    pub fn scan(key: u64, count: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Scan,
            key,
            scan_count: Some(count.into()),
        }
    }

    pub fn is_insert(&self) -> bool {
        self.kind == OperationKind::Insert
    }
}
