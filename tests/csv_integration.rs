use std::fs;

use fileutils::{CsvRow, FileUtilsError, QuoteError, csv_to_rows};
use tempfile::tempdir;

#[test]
fn rows_follow_header_and_file_order() {
    let td = tempdir().unwrap();
    let p = td.path().join("data.csv");
    fs::write(&p, "a,b\n1,2\n3,4\n").unwrap();

    let rows = csv_to_rows(&p, b',').unwrap();
    assert_eq!(
        rows,
        vec![
            CsvRow::from_iter([("a", "1"), ("b", "2")]),
            CsvRow::from_iter([("a", "3"), ("b", "4")]),
        ]
    );
}

#[test]
fn header_only_file_yields_empty_rows() {
    let td = tempdir().unwrap();
    let p = td.path().join("head.csv");
    fs::write(&p, "id|name\n").unwrap();
    assert!(csv_to_rows(&p, b'|').unwrap().is_empty());
}

#[test]
fn tab_delimited_without_trailing_newline() {
    let td = tempdir().unwrap();
    let p = td.path().join("data.tsv");
    fs::write(&p, "k\tv\nalpha\tone, two").unwrap();

    let rows = csv_to_rows(&p, b'\t').unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("k"), Some("alpha"));
    assert_eq!(rows[0].get("v"), Some("one, two"));
}

#[test]
fn malformed_record_aborts_without_rows() {
    let td = tempdir().unwrap();
    let p = td.path().join("bad.csv");
    fs::write(&p, "a,b\n1,2\n3,4,5\n6,7\n").unwrap();

    let err = csv_to_rows(&p, b',').unwrap_err();
    match &err {
        FileUtilsError::Csv { path, .. } => assert_eq!(path, &p),
        other => panic!("expected Csv error, got {other:?}"),
    }
    assert!(err.to_string().contains("decode csv"));
}

#[test]
fn missing_file_is_io_error() {
    let td = tempdir().unwrap();
    let p = td.path().join("none.csv");
    let err = csv_to_rows(&p, b',').unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    assert!(err.to_string().contains("open csv file"));
}

fn assert_quote_failure(content: &str, expected: fn(&QuoteError) -> bool) {
    let td = tempdir().unwrap();
    let p = td.path().join("quoted.csv");
    fs::write(&p, content).unwrap();

    let (path, source) = match csv_to_rows(&p, b',') {
        Err(FileUtilsError::Csv { path, source }) => (path, source),
        other => panic!("expected Csv error for {content:?}, got {other:?}"),
    };
    assert_eq!(path, p);
    let inner = match source.kind() {
        csv::ErrorKind::Io(e) => e.get_ref().and_then(|i| i.downcast_ref::<QuoteError>()),
        _ => None,
    };
    assert!(inner.is_some_and(expected), "unexpected source: {source:?}");
}

#[test]
fn bare_quote_aborts_decode() {
    assert_quote_failure("a,b\n1,2\n3,x\"y\n", |e| {
        matches!(e, QuoteError::BareQuote { line: 3, .. })
    });
}

#[test]
fn junk_after_closing_quote_aborts_decode() {
    assert_quote_failure("a,b\n1,\"ab\"c\n", |e| {
        matches!(e, QuoteError::AfterClosingQuote { line: 2, .. })
    });
}

#[test]
fn unterminated_quote_aborts_decode() {
    assert_quote_failure("a,b\n1,2\n3,\"open\n", |e| {
        matches!(e, QuoteError::Unterminated { line: 3 })
    });
}
