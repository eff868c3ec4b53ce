//! Key-space remapping for YCSB workloads.
//!
//! A workload is remapped in two phases that share one [`KeyMapping`]:
//!
//! ```text
//!  load records ──► WorkloadRemapper::remap_load ──► INSERT <key> ...
//!                          │ (mapping)
//!  txn records  ──► WorkloadRemapper::remap_transaction ──► READ/UPDATE/SCAN/INSERT <key> ...
//! ```
//!
//! The policy is chosen once per workload:
//!
//! - `randint` - keys pass through unchanged
//! - `monoint` - inserts get 0, 1, 2, ... in file order
//! - `email` - inserts get host-reversed addresses sampled from a [`Corpus`]
//!
//! [`remap_workload`] drives both phases from files and only publishes the two
//! output files once both phases succeeded.

mod corpus;
mod error;
mod mapping;
mod metrics;
mod output;
mod policy;
mod remapper;

pub use corpus::{reverse_host_name, Corpus};
pub use error::RemapError;
pub use mapping::KeyMapping;
pub use metrics::RemapMetrics;
pub use output::{remap_workload, write_record, WorkloadFiles};
pub use policy::{policy_for, KeyPolicy, Monotonic, PassThrough, SyntheticIdentity};
pub use remapper::{Phase, WorkloadRemapper};
