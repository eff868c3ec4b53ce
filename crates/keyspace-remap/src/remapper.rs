//! Per-workload remapping state machine.

use crate::corpus::Corpus;
use crate::error::RemapError;
use crate::metrics::RemapMetrics;
use crate::output::write_record;
use crate::policy::{policy_for, KeyPolicy};
use std::io::Write;
use std::time::Instant;
use workload_types::{KeySpace, OperationKind, OperationRecord, Stream};

const PROGRESS_INTERVAL: u64 = 100_000;

/// Where a [`WorkloadRemapper`] is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Load,
    Transaction,
    Done,
    Aborted,
}

/// Remaps one workload: the load stream, then the transaction stream.
///
/// The key mapping lives inside the policy and is dropped with the remapper,
/// so nothing leaks between workloads.
pub struct WorkloadRemapper<'c> {
    key_space: KeySpace,
    policy: Box<dyn KeyPolicy + 'c>,
    phase: Phase,
    metrics: RemapMetrics,
    started: Instant,
}

impl<'c> WorkloadRemapper<'c> {
    /// Create a remapper. `corpus` is required for [`KeySpace::Email`] only.
    pub fn new(key_space: KeySpace, corpus: Option<&'c Corpus>) -> Result<Self, RemapError> {
        Ok(Self {
            key_space,
            policy: policy_for(key_space, corpus)?,
            phase: Phase::Init,
            metrics: RemapMetrics::default(),
            started: Instant::now(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Write the transformed load stream. Returns the number of lines written.
    ///
    /// The load stream holds INSERTs only; anything else aborts the run.
    pub fn remap_load<W: Write>(
        &mut self,
        records: &[OperationRecord],
        out: &mut W,
    ) -> Result<u64, RemapError> {
        self.run_phase(Phase::Init, Phase::Load, |this| {
            if let Some(record) = records.iter().find(|r| !r.is_insert()) {
                return Err(RemapError::UnexpectedLoadOperation {
                    kind: record.kind,
                    key: record.key,
                });
            }
            this.policy.begin_load(records.len())?;
            let mut written = 0;
            for record in records {
                this.remap_one(record, Stream::Load, out)?;
                written += 1;
            }
            Ok(written)
        })
    }

    /// Write the transformed transaction stream. Returns the number of lines written.
    ///
    /// Records are consumed lazily so the stream never has to fit in memory.
    pub fn remap_transaction<I, E, W>(&mut self, records: I, out: &mut W) -> Result<u64, RemapError>
    where
        I: IntoIterator<Item = Result<OperationRecord, E>>,
        RemapError: From<E>,
        W: Write,
    {
        let written = self.run_phase(Phase::Load, Phase::Transaction, |this| {
            let mut written = 0;
            for record in records {
                this.remap_one(&record?, Stream::Transaction, out)?;
                written += 1;
            }
            Ok(written)
        })?;
        self.phase = Phase::Done;
        self.metrics.total_duration = self.started.elapsed();
        Ok(written)
    }

    /// Metrics for a completed run.
    pub fn finish(self) -> Result<RemapMetrics, RemapError> {
        if self.phase != Phase::Done {
            return Err(RemapError::InvalidPhase {
                expected: Phase::Done,
                actual: self.phase,
            });
        }
        Ok(self.metrics)
    }

    fn run_phase<F>(&mut self, expected: Phase, next: Phase, body: F) -> Result<u64, RemapError>
    where
        F: FnOnce(&mut Self) -> Result<u64, RemapError>,
    {
        if self.phase != expected {
            return Err(RemapError::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        self.phase = next;
        body(self).inspect_err(|e| {
            tracing::debug!("{} remap aborted during {:?}: {}", self.key_space, next, e);
            self.phase = Phase::Aborted;
        })
    }

    fn remap_one<W: Write>(
        &mut self,
        record: &OperationRecord,
        stream: Stream,
        out: &mut W,
    ) -> Result<(), RemapError> {
        let key = match record.kind {
            OperationKind::Insert => self.policy.insert(record.key, stream)?,
            kind => self.policy.resolve(kind, record.key)?,
        };
        write_record(out, record.kind, &key, record.scan_count.as_deref())?;

        self.metrics.record(stream, record.kind);
        let total = self.metrics.total_records();
        if total % PROGRESS_INTERVAL == 0 {
            tracing::debug!("Remapped {} records", total);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ycsb_extract::ExtractError;

    fn ok(records: Vec<OperationRecord>) -> impl Iterator<Item = Result<OperationRecord, ExtractError>> {
        records.into_iter().map(Ok)
    }

    fn run(
        key_space: KeySpace,
        corpus: Option<&Corpus>,
        load: &[OperationRecord],
        txn: Vec<OperationRecord>,
    ) -> Result<(String, String), RemapError> {
        let mut remapper = WorkloadRemapper::new(key_space, corpus)?;
        let mut load_out = Vec::new();
        let mut txn_out = Vec::new();
        remapper.remap_load(load, &mut load_out)?;
        remapper.remap_transaction(ok(txn), &mut txn_out)?;
        remapper.finish()?;
        Ok((
            String::from_utf8(load_out).unwrap(),
            String::from_utf8(txn_out).unwrap(),
        ))
    }

    fn scenario(first: u64, second: u64, third: u64) -> (Vec<OperationRecord>, Vec<OperationRecord>) {
        (
            vec![OperationRecord::insert(first), OperationRecord::insert(second)],
            vec![
                OperationRecord::read(first),
                OperationRecord::scan(second, "5"),
                OperationRecord::insert(third),
            ],
        )
    }

    #[test]
    fn test_monoint_scenario() {
        let (load, txn) = scenario(0, 1, 2);
        let (load_out, txn_out) = run(KeySpace::MonoInt, None, &load, txn).unwrap();
        assert_eq!(load_out, "INSERT 0\nINSERT 1\n");
        assert_eq!(txn_out, "READ 0\nSCAN 1 5\nINSERT 2\n");
    }

    #[test]
    fn test_randint_scenario() {
        let (load, txn) = scenario(0, 1, 2);
        let (load_out, txn_out) = run(KeySpace::RandInt, None, &load, txn).unwrap();
        assert_eq!(load_out, "INSERT 0\nINSERT 1\n");
        assert_eq!(txn_out, "READ 0\nSCAN 1 5\nINSERT 2\n");
    }

    #[test]
    fn test_non_sequential_keys() {
        let (load, txn) = scenario(7, 42, 1000);

        let (load_out, txn_out) = run(KeySpace::RandInt, None, &load, txn.clone()).unwrap();
        assert_eq!(load_out, "INSERT 7\nINSERT 42\n");
        assert_eq!(txn_out, "READ 7\nSCAN 42 5\nINSERT 1000\n");

        let (load_out, txn_out) = run(KeySpace::MonoInt, None, &load, txn).unwrap();
        assert_eq!(load_out, "INSERT 0\nINSERT 1\n");
        assert_eq!(txn_out, "READ 0\nSCAN 1 5\nINSERT 2\n");
    }

    #[test]
    fn test_email_scenario() {
        let corpus = Corpus::from_entries([
            "a@one.com",
            "b@two.org",
            "c@three.net",
            "d@four.io",
            "e@five.dev",
        ]);
        let (load, mut txn) = scenario(7, 42, 1000);
        txn.push(OperationRecord::update(1000));

        let (load_out, txn_out) = run(KeySpace::Email, Some(&corpus), &load, txn).unwrap();
        // stride = 5 / 2 = 2: load samples 0 and 2, the txn insert samples 1.
        assert_eq!(load_out, "INSERT \"com.one.@a\"\nINSERT \"net.three.@c\"\n");
        assert_eq!(
            txn_out,
            "READ \"com.one.@a\"\nSCAN \"net.three.@c\" 5\nINSERT \"org.two.@b\"\nUPDATE \"org.two.@b\"\n"
        );
    }

    #[test]
    fn test_unmapped_update_aborts() {
        let mut remapper = WorkloadRemapper::new(KeySpace::MonoInt, None).unwrap();
        let mut sink = Vec::new();
        remapper
            .remap_load(&[OperationRecord::insert(1)], &mut sink)
            .unwrap();

        let err = remapper
            .remap_transaction(ok(vec![OperationRecord::update(5)]), &mut sink)
            .unwrap_err();
        assert!(matches!(err, RemapError::UnmappedKey { key: 5, .. }));
        assert_eq!(remapper.phase(), Phase::Aborted);
        assert!(matches!(
            remapper.finish(),
            Err(RemapError::InvalidPhase {
                expected: Phase::Done,
                actual: Phase::Aborted
            })
        ));
    }

    #[test]
    fn test_extract_error_aborts_transaction() {
        let mut remapper = WorkloadRemapper::new(KeySpace::RandInt, None).unwrap();
        let mut sink = Vec::new();
        remapper.remap_load(&[], &mut sink).unwrap();

        let records = vec![
            Ok(OperationRecord::read(1)),
            Err(ExtractError::MalformedKey {
                line: 2,
                key: "userX".to_string(),
            }),
            Ok(OperationRecord::read(2)),
        ];
        let err = remapper.remap_transaction(records, &mut sink).unwrap_err();
        assert!(matches!(err, RemapError::Extract(_)));
        assert_eq!(String::from_utf8(sink).unwrap(), "READ 1\n");
        assert_eq!(remapper.phase(), Phase::Aborted);
    }

    #[test]
    fn test_load_rejects_non_insert() {
        let mut remapper = WorkloadRemapper::new(KeySpace::MonoInt, None).unwrap();
        let mut sink = Vec::new();
        let load = [OperationRecord::insert(1), OperationRecord::read(1)];

        let err = remapper.remap_load(&load, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            RemapError::UnexpectedLoadOperation {
                kind: OperationKind::Read,
                key: 1
            }
        ));
        assert!(sink.is_empty());
        assert_eq!(remapper.phase(), Phase::Aborted);
    }

    #[test]
    fn test_phases_must_run_in_order() {
        let mut remapper = WorkloadRemapper::new(KeySpace::MonoInt, None).unwrap();
        let mut sink = Vec::new();
        assert_eq!(remapper.phase(), Phase::Init);

        let err = remapper.remap_transaction(ok(vec![]), &mut sink).unwrap_err();
        assert!(matches!(
            err,
            RemapError::InvalidPhase {
                expected: Phase::Load,
                actual: Phase::Init
            }
        ));

        remapper.remap_load(&[], &mut sink).unwrap();
        assert_eq!(remapper.phase(), Phase::Load);
        assert!(remapper.remap_load(&[], &mut sink).is_err());

        remapper.remap_transaction(ok(vec![]), &mut sink).unwrap();
        assert_eq!(remapper.phase(), Phase::Done);
        assert_eq!(remapper.finish().unwrap().total_records(), 0);
    }

    #[test]
    fn test_metrics() {
        let (load, txn) = scenario(7, 42, 1000);
        let mut remapper = WorkloadRemapper::new(KeySpace::MonoInt, None).unwrap();
        let mut sink = Vec::new();
        assert_eq!(remapper.remap_load(&load, &mut sink).unwrap(), 2);
        assert_eq!(remapper.remap_transaction(ok(txn), &mut sink).unwrap(), 3);

        let metrics = remapper.finish().unwrap();
        assert_eq!(metrics.load_inserts, 2);
        assert_eq!(metrics.txn_reads, 1);
        assert_eq!(metrics.txn_scans, 1);
        assert_eq!(metrics.txn_inserts, 1);
        assert_eq!(metrics.txn_updates, 0);
    }
}
