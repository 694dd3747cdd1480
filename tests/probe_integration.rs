use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use fileutils::{Verdict, is_stable, probe_stability};
use tempfile::tempdir;

/// Append one byte every `every` until `stop` is set.
fn spawn_grower(path: std::path::PathBuf, every: Duration, stop: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let mut f = OpenOptions::new().append(true).open(&path).unwrap();
            f.write_all(b"+").unwrap();
            drop(f);
            thread::sleep(every);
        }
    })
}

#[test]
fn unchanged_file_is_stable_on_second_sample() {
    let td = tempdir().unwrap();
    let p = td.path().join("done.bin");
    fs::write(&p, b"finished").unwrap();

    let r = probe_stability(&p, 5, Duration::from_millis(10));
    assert_eq!(r.verdict, Verdict::Stable);
    assert_eq!(r.samples.len(), 2);
    assert!(r.samples.iter().all(|s| s.size == 8));
    assert!(is_stable(&p, 5, Duration::from_millis(10)));
}

#[test]
fn empty_file_is_stable() {
    let td = tempdir().unwrap();
    let p = td.path().join("empty");
    fs::File::create(&p).unwrap();
    assert!(is_stable(&p, 3, Duration::from_millis(5)));
}

#[test]
fn nonexistent_path_fails_after_first_sample_without_waiting() {
    let td = tempdir().unwrap();
    let p = td.path().join("nope");

    let started = Instant::now();
    let r = probe_stability(&p, 20, Duration::from_millis(500));
    assert_eq!(r.verdict, Verdict::Unavailable);
    assert_eq!(r.attempts_used(), 1);
    assert!(started.elapsed() < Duration::from_millis(400), "must not sleep on a failed sample");
}

#[test]
fn directory_is_not_stable() {
    let td = tempdir().unwrap();
    assert!(!is_stable(td.path(), 3, Duration::from_millis(5)));
}

#[cfg(unix)]
#[test]
fn symlink_to_regular_file_is_probed_as_the_file() {
    let td = tempdir().unwrap();
    let target = td.path().join("target");
    fs::write(&target, b"abc").unwrap();
    let link = td.path().join("link");
    std::os::unix::fs::symlink(&target, &link).unwrap();
    assert!(is_stable(&link, 3, Duration::from_millis(5)));
}

#[test]
fn continuously_growing_file_exhausts_attempts() {
    let td = tempdir().unwrap();
    let p = td.path().join("growing.log");
    fs::write(&p, b"seed").unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let grower = spawn_grower(p.clone(), Duration::from_millis(5), Arc::clone(&stop));
    // let the writer get going
    thread::sleep(Duration::from_millis(20));

    let r = probe_stability(&p, 3, Duration::from_millis(100));
    stop.store(true, Ordering::Relaxed);
    grower.join().unwrap();

    assert_eq!(r.verdict, Verdict::Changing);
    assert_eq!(r.samples.len(), 3);
    let sizes: Vec<u64> = r.samples.iter().map(|s| s.size).collect();
    assert!(sizes.windows(2).all(|w| w[1] > w[0]), "sizes: {sizes:?}");
}

#[test]
fn attempts_below_three_are_raised() {
    let td = tempdir().unwrap();
    let p = td.path().join("growing2.log");
    fs::write(&p, b"seed").unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let grower = spawn_grower(p.clone(), Duration::from_millis(5), Arc::clone(&stop));
    thread::sleep(Duration::from_millis(20));

    let r = probe_stability(&p, 0, Duration::from_millis(100));
    stop.store(true, Ordering::Relaxed);
    grower.join().unwrap();

    assert_eq!(r.verdict, Verdict::Changing);
    assert_eq!(r.samples.len(), 3);
}
