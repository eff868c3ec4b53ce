//! Per-workload pipeline: run YCSB twice, then remap both streams.

use crate::batch::{BatchConfig, WorkloadSpec};
use crate::ycsb::{YcsbPhase, YcsbRunner};
use crate::{CorpusOpts, GeneratorOpts};
use anyhow::Context;
use clap::Args;
use keyspace_remap::{remap_workload, Corpus, RemapMetrics, WorkloadFiles};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Arguments of the `generate` command.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Batch CSV file with a "workload, keytype" header
    pub config: PathBuf,

    #[command(flatten)]
    pub generator: GeneratorOpts,

    /// Directory receiving <workload>_<keytype>_load.dat and _txn.dat
    #[arg(long, short = 'o', default_value = "workloads")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub corpus: CorpusOpts,

    /// Validate the batch file and print what would run
    #[arg(long)]
    pub dry_run: bool,
}

/// Where a workload's datasets are written.
pub fn output_paths(output_dir: &Path, spec: &WorkloadSpec) -> (PathBuf, PathBuf) {
    let name = spec.name();
    (
        output_dir.join(format!("{name}_load.dat")),
        output_dir.join(format!("{name}_txn.dat")),
    )
}

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub workloads: Vec<(String, RemapMetrics)>,
    pub total_duration: Duration,
}

/// Generate one workload. Raw YCSB output goes to temporary files in
/// `output_dir` that are removed when this returns.
pub async fn generate_workload(
    runner: &YcsbRunner,
    spec: &WorkloadSpec,
    output_dir: &Path,
    corpus: Option<&Corpus>,
) -> anyhow::Result<RemapMetrics> {
    tracing::info!("workload = {}, key type = {}", spec.workload, spec.key_space);

    let raw_load = raw_output(output_dir, "ycsb_load_")?;
    let raw_txn = raw_output(output_dir, "ycsb_txn_")?;
    runner
        .run(YcsbPhase::Load, &spec.workload, raw_load.as_file().try_clone()?)
        .await?;
    runner
        .run(YcsbPhase::Run, &spec.workload, raw_txn.as_file().try_clone()?)
        .await?;

    let (load_out, txn_out) = output_paths(output_dir, spec);
    let files = WorkloadFiles {
        raw_load: raw_load.path().to_path_buf(),
        raw_txn: raw_txn.path().to_path_buf(),
        load_out,
        txn_out,
    };
    let metrics = remap_workload(spec.key_space, corpus, &files)
        .with_context(|| format!("Failed to remap workload '{}'", spec.name()))?;

    tracing::info!(
        "Generated {} and {}",
        files.load_out.display(),
        files.txn_out.display()
    );
    Ok(metrics)
}

/// Generate every workload of a batch, in order, stopping at the first failure.
pub async fn run_generate(args: GenerateArgs) -> anyhow::Result<BatchSummary> {
    let started = Instant::now();
    tracing::info!(
        "Generating workloads defined in {}",
        args.config.display()
    );

    let config = BatchConfig::from_path(&args.config)?;
    config.validate(&args.generator.workload_dir)?;
    let runner = YcsbRunner::new(&args.generator.ycsb_dir, &args.generator.workload_dir);

    if args.dry_run {
        for spec in &config.workloads {
            let (load_out, txn_out) = output_paths(&args.output_dir, spec);
            for phase in [YcsbPhase::Load, YcsbPhase::Run] {
                println!(
                    "{} {}",
                    runner.binary().display(),
                    runner.args(phase, &spec.workload).join(" ")
                );
            }
            println!(
                "{} -> {} {}",
                spec.key_space,
                load_out.display(),
                txn_out.display()
            );
        }
        return Ok(BatchSummary::default());
    }

    let corpus = if config.needs_corpus() {
        let path = &args.corpus.corpus;
        Some(
            Corpus::from_path(path)
                .with_context(|| format!("Failed to read corpus source: {}", path.display()))?,
        )
    } else {
        None
    };

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            args.output_dir.display()
        )
    })?;

    let mut summary = BatchSummary::default();
    for spec in &config.workloads {
        let metrics = generate_workload(&runner, spec, &args.output_dir, corpus.as_ref()).await?;
        summary.workloads.push((spec.name(), metrics));
    }
    summary.total_duration = started.elapsed();

    tracing::info!(
        "Generated {} workloads in {:?}",
        summary.workloads.len(),
        summary.total_duration
    );
    Ok(summary)
}

fn raw_output(dir: &Path, prefix: &str) -> anyhow::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))
}
