use std::fs;

use fileutils::{FileUtilsError, move_path};
use tempfile::tempdir;

#[test]
fn move_renames_file() {
    let td = tempdir().unwrap();
    let src = td.path().join("a.txt");
    let dst = td.path().join("b.txt");
    fs::write(&src, b"payload").unwrap();

    move_path(&src, &dst).expect("move");
    assert!(!src.exists());
    assert_eq!(fs::read(&dst).unwrap(), b"payload");
}

#[test]
fn move_renames_directory() {
    let td = tempdir().unwrap();
    let src = td.path().join("dir_a");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("inner"), b"1").unwrap();
    let dst = td.path().join("dir_b");

    move_path(&src, &dst).expect("move dir");
    assert!(dst.join("inner").is_file());
    assert!(!src.exists());
}

#[cfg(unix)]
#[test]
fn move_replaces_existing_file() {
    let td = tempdir().unwrap();
    let src = td.path().join("new");
    let dst = td.path().join("old");
    fs::write(&src, b"new").unwrap();
    fs::write(&dst, b"old").unwrap();

    move_path(&src, &dst).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), b"new");
}

#[test]
fn missing_source_preserves_os_error() {
    let td = tempdir().unwrap();
    let src = td.path().join("ghost");
    let dst = td.path().join("dst");

    let err = move_path(&src, &dst).unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    match &err {
        FileUtilsError::Io { path, source, .. } => {
            assert_eq!(path, &src);
            assert!(source.raw_os_error().is_some());
        }
        other => panic!("expected Io, got {other:?}"),
    }
    assert!(!dst.exists());
}
