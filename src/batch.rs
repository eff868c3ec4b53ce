//! Batch configuration: which workloads to generate and with which key type.
//!
//! ```csv
//! # workloads to generate
//! workload, keytype
//! workloada, monoint
//! workloade, email
//! ```

use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;
use workload_types::KeySpace;

const HEADER_HINT: &str =
    "Workload file must be a CSV file with header line consisting of: \"workload, keytype\"";

#[derive(Debug, Deserialize)]
struct BatchRow {
    workload: String,
    keytype: String,
}

/// One workload of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    /// YCSB workload definition file name, relative to the workload directory.
    pub workload: String,
    pub key_space: KeySpace,
    /// Line of the batch file this workload was read from.
    pub line: u64,
}

impl WorkloadSpec {
    /// `<workload>_<keytype>`, the stem of both output files.
    pub fn name(&self) -> String {
        format!("{}_{}", self.workload, self.key_space)
    }
}

/// Ordered list of workloads read from a batch CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub workloads: Vec<WorkloadSpec>,
}

impl BatchConfig {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch configuration: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Invalid batch configuration: {}", path.display()))
    }

    /// Parse batch CSV text. Lines starting with `#` are comments.
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(contents.as_bytes());

        let headers = reader.headers().context(HEADER_HINT)?.clone();
        if !headers.iter().any(|h| h == "workload") || !headers.iter().any(|h| h == "keytype") {
            bail!("{HEADER_HINT}");
        }

        let mut workloads = Vec::new();
        for result in reader.records() {
            let record = result.context("Failed to read batch configuration row")?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: BatchRow = record
                .deserialize(Some(&headers))
                .with_context(|| format!("Line {line}: {HEADER_HINT}"))?;
            let key_space = row
                .keytype
                .parse::<KeySpace>()
                .with_context(|| format!("Line {line}: invalid key type"))?;
            workloads.push(WorkloadSpec {
                workload: row.workload,
                key_space,
                line,
            });
        }

        if workloads.is_empty() {
            bail!("Batch configuration defines no workloads");
        }
        Ok(Self { workloads })
    }

    /// Check every workload definition exists before any workload runs.
    pub fn validate(&self, workload_dir: &Path) -> anyhow::Result<()> {
        for spec in &self.workloads {
            let path = workload_dir.join(&spec.workload);
            if !path.is_file() {
                bail!(
                    "Workload definition {} (line {}) does not exist",
                    path.display(),
                    spec.line
                );
            }
        }
        Ok(())
    }

    /// Whether any workload samples the corpus.
    pub fn needs_corpus(&self) -> bool {
        self.workloads.iter().any(|w| w.key_space.needs_corpus())
    }
}
