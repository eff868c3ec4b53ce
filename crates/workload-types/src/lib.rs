//! Core types for the ycsb-keygen pipeline.
//!
//! This crate provides the types shared by the extractor, the remapper and
//! the batch driver:
//!
//! - [`OperationKind`] - The four YCSB operations the pipeline understands
//! - [`OperationRecord`] - One normalized operation with its original key
//! - [`Stream`] - Which generator phase a record came from
//! - [`KeySpace`] - The key-space policy applied to a workload
//! - [`TransformedKey`] - A key after the policy was applied
//!
//! # Architecture
//!
//! ```text
//! workload-types (this crate)
//!    │
//!    ├─── ycsb-extract    (raw generator text -> OperationRecord)
//!    │
//!    └─── keyspace-remap  (OperationRecord -> TransformedKey lines)
//! ```

pub mod key;
pub mod record;

pub use key::{KeySpace, KeySpaceParseError, TransformedKey};
pub use record::{OperationKind, OperationRecord, Stream};
