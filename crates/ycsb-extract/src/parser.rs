//! Single-line parser.

use crate::error::ExtractError;
use workload_types::{OperationKind, OperationRecord, Stream};

/// Length of the tag YCSB puts in front of every key (`user`).
pub const KEY_TAG_LEN: usize = 4;

const KEY_COLUMN: usize = 2;
const SCAN_COUNT_COLUMN: usize = 3;

/// Parse one line of generator output.
///
/// Returns `Ok(None)` for blank lines, non-operation lines, and operations
/// the stream does not retain (anything but INSERT in the load stream).
/// Errors carry line number 0; [`crate::RecordReader`] fills in the real one.
pub fn parse_line(line: &str, stream: Stream) -> Result<Option<OperationRecord>, ExtractError> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    let Some(kind) = cols.first().and_then(|token| OperationKind::from_token(token)) else {
        return Ok(None);
    };
    if !stream.retains(kind) {
        return Ok(None);
    }

    let expected = match kind {
        OperationKind::Scan => SCAN_COUNT_COLUMN + 1,
        _ => KEY_COLUMN + 1,
    };
    if cols.len() < expected {
        return Err(ExtractError::MissingColumns {
            line: 0,
            kind,
            found: cols.len(),
            expected,
        });
    }

    let key = parse_key(cols[KEY_COLUMN])?;
    let scan_count = match kind {
        OperationKind::Scan => {
            let raw = cols[SCAN_COUNT_COLUMN];
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ExtractError::MalformedScanCount {
                    line: 0,
                    value: raw.to_string(),
                });
            }
            Some(raw.to_string())
        }
        _ => None,
    };

    Ok(Some(OperationRecord {
        kind,
        key,
        scan_count,
    }))
}

/// Strip the key tag and parse the remaining digits.
fn parse_key(field: &str) -> Result<u64, ExtractError> {
    let malformed = || ExtractError::MalformedKey {
        line: 0,
        key: field.to_string(),
    };
    let digits = field.get(KEY_TAG_LEN..).ok_or_else(malformed)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    digits.parse::<u64>().map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_insert() {
        let record = parse_line(
            "INSERT usertable user6284781860667377211 [ field0=abc field1=def ]",
            Stream::Load,
        )
        .unwrap();
        assert_eq!(record, Some(OperationRecord::insert(6284781860667377211)));
    }

    #[test]
    fn test_load_stream_drops_non_inserts() {
        assert_eq!(
            parse_line("READ usertable user1 [ <all fields>]", Stream::Load).unwrap(),
            None
        );
        // Malformed but dropped before validation, the load phase never reads it.
        assert_eq!(parse_line("SCAN usertable", Stream::Load).unwrap(), None);
    }

    #[test]
    fn test_transaction_stream_keeps_all_kinds() {
        let read = parse_line("READ usertable user7 [ <all fields>]", Stream::Transaction);
        assert_eq!(read.unwrap(), Some(OperationRecord::read(7)));

        let update = parse_line("UPDATE usertable user8 [ field3=x ]", Stream::Transaction);
        assert_eq!(update.unwrap(), Some(OperationRecord::update(8)));

        let scan = parse_line("SCAN usertable user9 42 [ <all fields>]", Stream::Transaction);
        assert_eq!(scan.unwrap(), Some(OperationRecord::scan(9, "42")));

        let insert = parse_line("INSERT usertable user10 [ f=1 ]", Stream::Transaction);
        assert_eq!(insert.unwrap(), Some(OperationRecord::insert(10)));
    }

    #[test]
    fn test_status_lines_are_ignored() {
        for line in [
            "",
            "   ",
            "[OVERALL], RunTime(ms), 1234",
            "Loading workload...",
            "Command line: -db site.ycsb.BasicDB -P workloads/workloada -load",
            "DELETE usertable user1",
        ] {
            assert_eq!(parse_line(line, Stream::Transaction).unwrap(), None, "{line}");
        }
    }

    #[test]
    fn test_missing_columns_is_an_error() {
        let err = parse_line("READ usertable", Stream::Transaction).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingColumns {
                kind: OperationKind::Read,
                found: 2,
                expected: 3,
                ..
            }
        ));

        let err = parse_line("SCAN usertable user1", Stream::Transaction).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingColumns {
                kind: OperationKind::Scan,
                found: 3,
                expected: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_keys() {
        for line in [
            "INSERT usertable usr",
            "INSERT usertable user",
            "INSERT usertable userabc",
            "INSERT usertable user-12",
            "INSERT usertable user99999999999999999999999",
        ] {
            let err = parse_line(line, Stream::Load).unwrap_err();
            assert!(matches!(err, ExtractError::MalformedKey { .. }), "{line}");
        }
    }

    #[test]
    fn test_tag_is_stripped_regardless_of_text() {
        assert_eq!(
            parse_line("INSERT t KEY0", Stream::Load).unwrap(),
            Some(OperationRecord::insert(0))
        );
    }

    #[test]
    fn test_malformed_scan_count() {
        let err = parse_line("SCAN usertable user1 many", Stream::Transaction).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedScanCount { ref value, .. } if value == "many"));

        let err = parse_line("SCAN usertable user1 -5", Stream::Transaction).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedScanCount { ref value, .. } if value == "-5"));
    }

    #[test]
    fn test_scan_count_kept_as_written() {
        assert_eq!(
            parse_line("SCAN t user1 007 [ ]", Stream::Transaction).unwrap(),
            Some(OperationRecord::scan(1, "007"))
        );

        let wide = "1234567890123456789012345";
        let line = format!("SCAN t user1 {wide} [ field0 ]");
        assert_eq!(
            parse_line(&line, Stream::Transaction).unwrap(),
            Some(OperationRecord::scan(1, wide))
        );
    }
}
