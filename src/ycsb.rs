//! Invocation of the YCSB command-line client.

use anyhow::{bail, Context};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// The database binding that prints operations instead of executing them.
pub const BASIC_BINDING: &str = "basic";

/// The two YCSB phases a workload is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YcsbPhase {
    Load,
    Run,
}

impl YcsbPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            YcsbPhase::Load => "load",
            YcsbPhase::Run => "run",
        }
    }
}

impl fmt::Display for YcsbPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs `bin/ycsb <phase> basic -P <workload> -s` and captures its stdout.
#[derive(Debug, Clone)]
pub struct YcsbRunner {
    binary: PathBuf,
    workload_dir: PathBuf,
}

impl YcsbRunner {
    pub fn new(ycsb_dir: &Path, workload_dir: &Path) -> Self {
        Self {
            binary: ycsb_dir.join("bin").join("ycsb"),
            workload_dir: workload_dir.to_path_buf(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn workload_path(&self, workload: &str) -> PathBuf {
        self.workload_dir.join(workload)
    }

    /// Arguments passed to the client, for logging and dry runs.
    pub fn args(&self, phase: YcsbPhase, workload: &str) -> Vec<String> {
        vec![
            phase.as_str().to_string(),
            BASIC_BINDING.to_string(),
            "-P".to_string(),
            self.workload_path(workload).display().to_string(),
            "-s".to_string(),
        ]
    }

    /// Run one phase, writing the client's stdout to `output`.
    ///
    /// Status output on stderr is passed through. A non-zero exit is an error.
    pub async fn run(&self, phase: YcsbPhase, workload: &str, output: File) -> anyhow::Result<()> {
        let args = self.args(phase, workload);
        tracing::info!("Running {} {}", self.binary.display(), args.join(" "));

        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(output))
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("Failed to start YCSB client {}", self.binary.display()))?;

        if !status.success() {
            bail!("YCSB {phase} for workload '{workload}' failed with {status}");
        }
        Ok(())
    }
}
