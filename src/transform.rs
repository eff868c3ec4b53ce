//! Remap already captured YCSB output without running the client.

use crate::CorpusOpts;
use anyhow::Context;
use clap::Args;
use keyspace_remap::{remap_workload, Corpus, RemapMetrics, WorkloadFiles};
use std::path::PathBuf;
use workload_types::KeySpace;

/// Arguments of the `transform` command.
#[derive(Args, Clone, Debug)]
pub struct TransformArgs {
    /// Raw output of `ycsb load`
    #[arg(long)]
    pub load: PathBuf,

    /// Raw output of `ycsb run`
    #[arg(long)]
    pub txn: PathBuf,

    /// Key-space policy
    #[arg(long, value_enum)]
    pub key_type: KeySpace,

    /// Transformed load dataset
    #[arg(long)]
    pub out_load: PathBuf,

    /// Transformed transaction dataset
    #[arg(long)]
    pub out_txn: PathBuf,

    #[command(flatten)]
    pub corpus: CorpusOpts,
}

pub fn run_transform(args: TransformArgs) -> anyhow::Result<RemapMetrics> {
    let corpus = if args.key_type.needs_corpus() {
        let path = &args.corpus.corpus;
        Some(
            Corpus::from_path(path)
                .with_context(|| format!("Failed to read corpus source: {}", path.display()))?,
        )
    } else {
        None
    };

    let files = WorkloadFiles {
        raw_load: args.load,
        raw_txn: args.txn,
        load_out: args.out_load,
        txn_out: args.out_txn,
    };
    remap_workload(args.key_type, corpus.as_ref(), &files).with_context(|| {
        format!(
            "Failed to remap {} and {}",
            files.raw_load.display(),
            files.raw_txn.display()
        )
    })
}
