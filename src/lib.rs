//! ycsb-keygen library
//!
//! Drives the YCSB client and rewrites its output into compact datasets for
//! index benchmarks, under one of three key spaces:
//!
//! - `randint` - the generator's integer keys, unchanged
//! - `monoint` - keys renumbered 0, 1, 2, ... in insert order
//! - `email` - keys replaced by host-reversed addresses sampled from a corpus
//!
//! # CLI Usage
//!
//! ```bash
//! # Generate every workload listed in a batch file
//! ycsb-keygen generate workloads.csv --ycsb-dir YCSB --workload-dir workload_spec
//!
//! # Remap output that was already captured
//! ycsb-keygen transform --load ycsb_load --txn ycsb_txn --key-type monoint \
//!   --out-load a_load.dat --out-txn a_txn.dat
//! ```

use clap::Args;
use std::path::PathBuf;

pub mod batch;
pub mod pipeline;
pub mod transform;
pub mod ycsb;

pub use batch::{BatchConfig, WorkloadSpec};
pub use pipeline::{generate_workload, output_paths, run_generate, BatchSummary, GenerateArgs};
pub use transform::{run_transform, TransformArgs};
pub use ycsb::{YcsbPhase, YcsbRunner};

#[derive(Args, Clone, Debug)]
pub struct GeneratorOpts {
    /// YCSB installation directory (contains bin/ycsb)
    #[arg(long, default_value = "YCSB", env = "YCSB_DIR")]
    pub ycsb_dir: PathBuf,

    /// Directory holding YCSB workload definition files
    #[arg(long, default_value = "workload_spec", env = "YCSB_WORKLOAD_DIR")]
    pub workload_dir: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct CorpusOpts {
    /// Corpus of addresses sampled by the email key type, one per line
    #[arg(long, default_value = "list.txt", env = "YCSB_CORPUS")]
    pub corpus: PathBuf,
}
