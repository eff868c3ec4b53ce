//! Output line format and file-level driver.

use crate::corpus::Corpus;
use crate::error::RemapError;
use crate::metrics::RemapMetrics;
use crate::remapper::WorkloadRemapper;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};
use workload_types::{KeySpace, OperationKind, Stream, TransformedKey};
use ycsb_extract::{extract_all, RecordReader};

/// Buffer size for reading generator output and writing datasets.
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Write one dataset line: `<KIND> <key>` or `<KIND> <key> <count>` for SCAN.
///
/// The scan count is written exactly as the generator printed it.
pub fn write_record<W: Write>(
    out: &mut W,
    kind: OperationKind,
    key: &TransformedKey,
    scan_count: Option<&str>,
) -> std::io::Result<()> {
    match scan_count {
        Some(count) => writeln!(out, "{kind} {key} {count}"),
        None => writeln!(out, "{kind} {key}"),
    }
}

/// Input and output paths of one workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadFiles {
    /// Raw `ycsb load` output.
    pub raw_load: PathBuf,
    /// Raw `ycsb run` output.
    pub raw_txn: PathBuf,
    /// Transformed load dataset.
    pub load_out: PathBuf,
    /// Transformed transaction dataset.
    pub txn_out: PathBuf,
}

/// Remap a workload from raw generator files into its two dataset files.
///
/// Both datasets are written to temporary files next to their destinations
/// and only renamed into place after both streams succeeded, so a failed run
/// never leaves a dataset behind.
pub fn remap_workload(
    key_space: KeySpace,
    corpus: Option<&Corpus>,
    files: &WorkloadFiles,
) -> Result<RemapMetrics, RemapError> {
    let mut remapper = WorkloadRemapper::new(key_space, corpus)?;

    let load_records = extract_all(open_buffered(&files.raw_load)?, Stream::Load)?;
    let mut load_tmp = dataset_tempfile(&files.load_out)?;
    {
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, load_tmp.as_file_mut());
        remapper.remap_load(&load_records, &mut writer)?;
        writer.flush()?;
    }
    drop(load_records);

    let txn_records = RecordReader::new(open_buffered(&files.raw_txn)?, Stream::Transaction);
    let mut txn_tmp = dataset_tempfile(&files.txn_out)?;
    {
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, txn_tmp.as_file_mut());
        remapper.remap_transaction(txn_records, &mut writer)?;
        writer.flush()?;
    }

    let metrics = remapper.finish()?;

    load_tmp
        .persist(&files.load_out)
        .map_err(|e| RemapError::Io(e.error))?;
    txn_tmp
        .persist(&files.txn_out)
        .map_err(|e| RemapError::Io(e.error))?;
    debug!(
        "Persisted {} and {}",
        files.load_out.display(),
        files.txn_out.display()
    );

    info!(
        "Remapped ({}) {} load and {} txn records in {:?} ({:.2} records/sec)",
        key_space,
        metrics.load_inserts,
        metrics.txn_records(),
        metrics.total_duration,
        metrics.records_per_second()
    );

    Ok(metrics)
}

fn open_buffered(path: &Path) -> std::io::Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
}

/// Temporary file next to `dest`. On unix it is created with mode 0666 less
/// the umask, the same as a plainly created file, so the renamed dataset is
/// not left owner-only.
fn dataset_tempfile(dest: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(parent_dir(dest))
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
