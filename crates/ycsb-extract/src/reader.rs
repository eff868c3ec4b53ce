//! Streaming extraction over a reader.

use crate::error::ExtractError;
use crate::parser::parse_line;
use std::io::BufRead;
use workload_types::{OperationRecord, Stream};

/// Iterator over the records of one generator stream, in input order.
///
/// Stops after the first error; the caller is expected to abort the workload.
pub struct RecordReader<R> {
    reader: R,
    stream: Stream,
    line: usize,
    buf: String,
    failed: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, stream: Stream) -> Self {
        Self {
            reader,
            stream,
            line: 0,
            buf: String::new(),
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<OperationRecord, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            }
            self.line += 1;

            match parse_line(&self.buf, self.stream) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.at_line(self.line)));
                }
            }
        }
    }
}

/// Read a whole stream into memory.
pub fn extract_all<R: BufRead>(
    reader: R,
    stream: Stream,
) -> Result<Vec<OperationRecord>, ExtractError> {
    let mut records = RecordReader::new(reader, stream);
    let collected = records.by_ref().collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(
        "Extracted {} {} records from {} lines",
        collected.len(),
        stream,
        records.lines_read()
    );
    Ok(collected)
}
