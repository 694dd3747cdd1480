use std::io;
use std::path::Path;

use fileutils::FileUtilsError;
use fileutils::fs_ops::io_error_with_help;

#[test]
fn notfound_fallback_hint_includes_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let err = io_error_with_help("open source file", p)(io::Error::from(io::ErrorKind::NotFound));
    let msg = err.to_string();
    assert!(msg.contains("open source file"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"));
    assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
}

#[cfg(unix)]
#[test]
fn enospc_hint_and_os_code_present() {
    let err = io_error_with_help("copy into destination", Path::new("/tmp/x"))(
        io::Error::from_raw_os_error(libc::ENOSPC),
    );
    let msg = err.to_string();
    assert!(msg.contains("insufficient space"), "msg was: {}", msg);
    assert!(msg.contains("os code"), "should include os code in message");
}

#[cfg(unix)]
#[test]
fn exdev_hint_for_rename() {
    let err = io_error_with_help("rename source", Path::new("/mnt/a"))(
        io::Error::from_raw_os_error(libc::EXDEV),
    );
    assert!(err.to_string().contains("cross-filesystem"));
}

#[test]
fn source_chain_keeps_original_error() {
    use std::error::Error as _;
    let err = io_error_with_help("open", Path::new("/x"))(io::Error::other("boom"));
    let src = err.source().expect("io source");
    assert_eq!(src.to_string(), "boom");
}

#[test]
fn codes_distinguish_failure_classes() {
    let not_stable = FileUtilsError::NotStable { path: "/a".into() };
    let io = io_error_with_help("open", Path::new("/a"))(io::Error::from(io::ErrorKind::NotFound));
    let durability = FileUtilsError::DurabilityNotGuaranteed {
        path: "/b".into(),
        source: io::Error::other("EIO"),
    };
    assert_eq!(not_stable.code(), 20);
    assert_eq!(io.code(), 10);
    assert_eq!(durability.code(), 40);
    assert!(durability.to_string().contains("durability is not guaranteed"));
    assert_eq!(durability.io_kind(), Some(io::ErrorKind::Other));
    assert!(not_stable.io_kind().is_none());
}
