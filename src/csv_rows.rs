//! CSV decoding into header-keyed rows.
//!
//! The first record is the header; every following record is zipped with it
//! positionally into a `CsvRow`. The whole input is materialized in memory.
//!
//! Notes:
//! - Any record whose field count differs from the header aborts the decode.
//! - Quoting is strict: a `"` inside an unquoted field, anything but a
//!   delimiter or line end after a closing quote, and end of input inside a
//!   quoted field all abort the decode with a `QuoteError`.
//! - The delimiter may not be `"`, `\r` or `\n`.
//! - Cells are decoded as bytes and converted lossily, so non-UTF-8 input is
//!   not a decode error.
//! - A duplicate header name keeps its first position; later columns overwrite the value.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::errors::{FileUtilsError, Result};
use crate::fs_ops::io_error_with_help;

/// One data record: header names mapped to cell values, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    cells: Vec<(String, String)>,
}

impl CsvRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = CsvRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl IntoIterator for CsvRow {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl Serialize for CsvRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Decode the CSV file at `path` using `delimiter` as field separator.
pub fn csv_to_rows(path: &Path, delimiter: u8) -> Result<Vec<CsvRow>> {
    let file = File::open(path).map_err(io_error_with_help("open csv file", path))?;
    let rows = csv_reader_to_rows(file, delimiter).map_err(|source| FileUtilsError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = rows.len(), "decoded csv");
    Ok(rows)
}

/// Strict-quoting violations. Reported as the `io::Error` payload of a
/// `csv::Error` so every decode failure shares one error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("bare \" in non-quoted field (line {line}, column {column})")]
    BareQuote { line: u64, column: u64 },

    #[error("extraneous or missing \" in quoted field (line {line}, column {column})")]
    AfterClosingQuote { line: u64, column: u64 },

    #[error("quoted field starting on line {line} is never closed")]
    Unterminated { line: u64 },

    #[error("invalid delimiter {0:?}")]
    InvalidDelimiter(char),
}

impl From<QuoteError> for csv::Error {
    fn from(e: QuoteError) -> Self {
        let kind = match e {
            QuoteError::InvalidDelimiter(_) => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::InvalidData,
        };
        csv::Error::from(io::Error::new(kind, e))
    }
}

/// True for bytes that cannot separate fields.
pub fn is_reserved_delimiter(b: u8) -> bool {
    matches!(b, b'"' | b'\r' | b'\n')
}

/// Decode CSV from any reader. The first record is the header.
pub fn csv_reader_to_rows<R: Read>(mut reader: R, delimiter: u8) -> csv::Result<Vec<CsvRow>> {
    if is_reserved_delimiter(delimiter) {
        return Err(QuoteError::InvalidDelimiter(delimiter as char).into());
    }
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    check_quoting(&input, delimiter)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .delimiter(delimiter)
        .from_reader(input.as_slice());

    let mut record = ByteRecord::new();
    if !rdr.read_byte_record(&mut record)? {
        return Ok(Vec::new());
    }
    let header: Vec<String> = record.iter().map(lossy).collect();

    let mut rows: Vec<CsvRow> = Vec::new();
    while rdr.read_byte_record(&mut record)? {
        rows.push(header.iter().cloned().zip(record.iter().map(lossy)).collect());
    }
    Ok(rows)
}

#[derive(Clone, Copy)]
enum Scan {
    FieldStart,
    Unquoted,
    Quoted { opened_on: u64 },
    /// Just saw a `"` inside a quoted field: either an escape or the close.
    QuoteSeen { opened_on: u64 },
}

/// Reject the quoting the `csv` reader would otherwise accept leniently.
/// Lines and columns are 1-based; columns count bytes.
fn check_quoting(input: &[u8], delimiter: u8) -> std::result::Result<(), QuoteError> {
    let mut state = Scan::FieldStart;
    let mut line: u64 = 1;
    let mut column: u64 = 0;

    for (i, &b) in input.iter().enumerate() {
        column += 1;
        let at_line_end =
            b == b'\n' || (b == b'\r' && matches!(input.get(i + 1), None | Some(b'\n')));
        state = match state {
            Scan::FieldStart | Scan::Unquoted if b == delimiter => Scan::FieldStart,
            Scan::FieldStart | Scan::Unquoted if at_line_end => Scan::FieldStart,
            Scan::FieldStart if b == b'"' => Scan::Quoted { opened_on: line },
            Scan::FieldStart | Scan::Unquoted if b == b'"' => {
                return Err(QuoteError::BareQuote { line, column });
            }
            Scan::FieldStart | Scan::Unquoted => Scan::Unquoted,
            Scan::Quoted { opened_on } if b == b'"' => Scan::QuoteSeen { opened_on },
            Scan::Quoted { .. } => state,
            Scan::QuoteSeen { opened_on } if b == b'"' => Scan::Quoted { opened_on },
            Scan::QuoteSeen { .. } if b == delimiter || at_line_end => Scan::FieldStart,
            Scan::QuoteSeen { .. } => {
                return Err(QuoteError::AfterClosingQuote { line, column });
            }
        };
        if b == b'\n' {
            line += 1;
            column = 0;
        }
    }

    match state {
        Scan::Quoted { opened_on } => Err(QuoteError::Unterminated { line: opened_on }),
        _ => Ok(()),
    }
}

fn lossy(cell: &[u8]) -> String {
    String::from_utf8_lossy(cell).into_owned()
}
