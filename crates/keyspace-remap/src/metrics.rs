//! Per-workload remap metrics.

use std::time::Duration;
use workload_types::{OperationKind, Stream};

/// Counts of records written for one workload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemapMetrics {
    /// INSERT lines written to the load file.
    pub load_inserts: u64,
    /// INSERT lines written to the transaction file.
    pub txn_inserts: u64,
    pub txn_reads: u64,
    pub txn_updates: u64,
    pub txn_scans: u64,
    /// Time from remapper creation to completion of the transaction stream.
    pub total_duration: Duration,
}

impl RemapMetrics {
    pub fn record(&mut self, stream: Stream, kind: OperationKind) {
        let counter = match (stream, kind) {
            (Stream::Load, _) => &mut self.load_inserts,
            (Stream::Transaction, OperationKind::Insert) => &mut self.txn_inserts,
            (Stream::Transaction, OperationKind::Read) => &mut self.txn_reads,
            (Stream::Transaction, OperationKind::Update) => &mut self.txn_updates,
            (Stream::Transaction, OperationKind::Scan) => &mut self.txn_scans,
        };
        *counter += 1;
    }

    /// Lines written to the transaction file.
    pub fn txn_records(&self) -> u64 {
        self.txn_inserts + self.txn_reads + self.txn_updates + self.txn_scans
    }

    pub fn total_records(&self) -> u64 {
        self.load_inserts + self.txn_records()
    }

    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.total_records() as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}
