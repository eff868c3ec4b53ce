//! Key-space policies.

use crate::corpus::{reverse_host_name, Corpus};
use crate::error::RemapError;
use crate::mapping::KeyMapping;
use workload_types::{KeySpace, OperationKind, Stream, TransformedKey};

/// How a workload turns generator keys into dataset keys.
pub trait KeyPolicy {
    /// Called once before the first load record, with the number of load inserts.
    fn begin_load(&mut self, _insert_count: usize) -> Result<(), RemapError> {
        Ok(())
    }

    /// Assign a key for an INSERT seen in `stream`.
    fn insert(&mut self, key: u64, stream: Stream) -> Result<TransformedKey, RemapError>;

    /// Resolve the key of a READ, UPDATE or SCAN.
    fn resolve(&self, kind: OperationKind, key: u64) -> Result<TransformedKey, RemapError>;
}

/// Build the policy for `key_space`. `email` borrows the corpus for the whole run.
pub fn policy_for<'c>(
    key_space: KeySpace,
    corpus: Option<&'c Corpus>,
) -> Result<Box<dyn KeyPolicy + 'c>, RemapError> {
    let policy: Box<dyn KeyPolicy + 'c> = match key_space {
        KeySpace::RandInt => Box::new(PassThrough),
        KeySpace::MonoInt => Box::new(Monotonic::new()),
        KeySpace::Email => {
            let corpus = corpus.ok_or(RemapError::MissingCorpus(key_space))?;
            Box::new(SyntheticIdentity::new(corpus))
        }
    };
    Ok(policy)
}

/// `randint`: the generator key is the dataset key.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl KeyPolicy for PassThrough {
    fn insert(&mut self, key: u64, _stream: Stream) -> Result<TransformedKey, RemapError> {
        Ok(TransformedKey::Int(key))
    }

    fn resolve(&self, _kind: OperationKind, key: u64) -> Result<TransformedKey, RemapError> {
        Ok(TransformedKey::Int(key))
    }
}

/// `monoint`: inserts are numbered 0, 1, 2, ... across both streams.
#[derive(Debug, Default)]
pub struct Monotonic {
    next: u64,
    mapping: KeyMapping<u64>,
}

impl Monotonic {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value the next insert will receive.
    pub fn next_value(&self) -> u64 {
        self.next
    }
}

impl KeyPolicy for Monotonic {
    fn insert(&mut self, key: u64, _stream: Stream) -> Result<TransformedKey, RemapError> {
        let value = self.next;
        self.mapping.assign(key, value);
        self.next += 1;
        Ok(TransformedKey::Int(value))
    }

    fn resolve(&self, kind: OperationKind, key: u64) -> Result<TransformedKey, RemapError> {
        self.mapping
            .resolve(kind, key)
            .map(|value| TransformedKey::Int(*value))
    }
}

/// `email`: inserts take host-reversed entries spread evenly across the corpus.
///
/// The N-th load insert samples index `N * stride`, the M-th transaction
/// insert samples `M * stride + 1`, where `stride = corpus.len() / load inserts`
/// (truncating). The offset only makes collisions between the two phases less
/// likely; it does not rule them out.
#[derive(Debug)]
pub struct SyntheticIdentity<'c> {
    corpus: &'c Corpus,
    stride: usize,
    load_inserts: usize,
    txn_inserts: usize,
    mapping: KeyMapping<String>,
}

impl<'c> SyntheticIdentity<'c> {
    pub fn new(corpus: &'c Corpus) -> Self {
        Self {
            corpus,
            stride: 0,
            load_inserts: 0,
            txn_inserts: 0,
            mapping: KeyMapping::new(),
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    fn sample_index(&self, stream: Stream) -> usize {
        match stream {
            Stream::Load => self.load_inserts * self.stride,
            Stream::Transaction => self.txn_inserts * self.stride + 1,
        }
    }
}

impl KeyPolicy for SyntheticIdentity<'_> {
    fn begin_load(&mut self, insert_count: usize) -> Result<(), RemapError> {
        if insert_count == 0 {
            return Err(RemapError::EmptyLoadStream);
        }
        let stride = self.corpus.len() / insert_count;
        if stride == 0 {
            return Err(RemapError::CorpusTooSmall {
                len: self.corpus.len(),
                inserts: insert_count,
            });
        }
        tracing::debug!(
            "Sampling {} load inserts from {} corpus entries with stride {}",
            insert_count,
            self.corpus.len(),
            stride
        );
        self.stride = stride;
        Ok(())
    }

    fn insert(&mut self, key: u64, stream: Stream) -> Result<TransformedKey, RemapError> {
        let index = self.sample_index(stream);
        let entry = self
            .corpus
            .get(index)
            .ok_or(RemapError::CorpusExhausted {
                index,
                len: self.corpus.len(),
            })?;
        let identity = reverse_host_name(entry);
        self.mapping.assign(key, identity.clone());
        match stream {
            Stream::Load => self.load_inserts += 1,
            Stream::Transaction => self.txn_inserts += 1,
        }
        Ok(TransformedKey::Text(identity))
    }

    fn resolve(&self, kind: OperationKind, key: u64) -> Result<TransformedKey, RemapError> {
        self.mapping
            .resolve(kind, key)
            .map(|identity| TransformedKey::Text(identity.clone()))
    }
}
