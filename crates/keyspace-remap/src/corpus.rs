//! Corpus source for synthetic identities.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Ordered list of candidate strings, sampled by index and never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<String>,
}

impl Corpus {
    /// Read one entry per line. Line endings are not part of the entry.
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let corpus = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "Loaded corpus '{}' with {} entries",
            path.display(),
            corpus.len()
        );
        Ok(corpus)
    }

    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
    /// failing the whole corpus.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let entries = reader
            .split(b'\n')
            .map(|line| line.map(|bytes| decode_entry(&bytes)))
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }
}

fn decode_entry(bytes: &[u8]) -> String {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b'\r' {
        end -= 1;
    }
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Turn `local@a.b.c` into `c.b.a.@local`.
///
/// Entries without `@` come out as `.` followed by the entry.
pub fn reverse_host_name(entry: &str) -> String {
    let Some((local, host)) = entry.split_once('@') else {
        return format!(".{entry}");
    };
    let mut reversed = String::with_capacity(entry.len() + 1);
    for label in host.split('.').rev() {
        reversed.push_str(label);
        reversed.push('.');
    }
    reversed.push('@');
    reversed.push_str(local);
    reversed
}
