//! YCSB output extraction.
//!
//! The `basic` binding of YCSB prints one line per operation:
//!
//! ```text
//! INSERT usertable user6284781860667377211 [ field0=... ]
//! READ usertable user1085412929577227069 [ <all fields>]
//! SCAN usertable user2183614224562289013 37 [ <all fields>]
//! ```
//!
//! This crate turns those lines into [`OperationRecord`]s, dropping status
//! and summary lines. A line that starts with an operation token but does not
//! have the expected columns is an error, never skipped.
//!
//! # Example
//!
//! ```rust
//! use workload_types::{OperationRecord, Stream};
//! use ycsb_extract::parse_line;
//!
//! let record = parse_line("SCAN usertable user12 5 [ ]", Stream::Transaction).unwrap();
//! assert_eq!(record, Some(OperationRecord::scan(12, "5")));
//! ```

mod error;
mod parser;
mod reader;

pub use error::ExtractError;
pub use parser::{parse_line, KEY_TAG_LEN};
pub use reader::{extract_all, RecordReader};
