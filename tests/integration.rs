//! Integration tests running every guarded operation against real files.
//!
//! These tests verify that:
//! 1. The gate rejects empty, blocked and wrongly-kinded paths before any I/O
//! 2. Each operation has the documented effect on disk
//! 3. Errors carry the failing operation and path

use guarded_fs::*;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

fn setup() -> (tempfile::TempDir, GuardedFs) {
    (tempfile::tempdir().unwrap(), GuardedFs::new())
}

fn text(fs: &GuardedFs, path: &Path) -> String {
    String::from_utf8(fs.read_all(path).unwrap()).unwrap()
}

fn missing_parent(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("no-such-dir").join("file.txt")
}

// =============================================================================
// Gate
// =============================================================================

#[test]
fn every_file_operation_rejects_empty_path() {
    let (_dir, fs) = setup();
    let is_empty = |r: Result<()>| matches!(r, Err(FioError::Guard(GuardError::EmptyPath)));

    assert!(matches!(
        fs.open(""),
        Err(FioError::Guard(GuardError::EmptyPath))
    ));
    assert!(is_empty(fs.write_string("", "x")));
    assert!(is_empty(fs.write_single("", "x")));
    assert!(is_empty(fs.touch("")));
    assert!(is_empty(fs.read_all("").map(|_| ())));
    assert!(is_empty(fs.exists("").map(|_| ())));
    assert!(is_empty(fs.remove("")));
    assert!(is_empty(fs.create_dir("")));
    assert!(is_empty(fs.reset("")));
    assert!(is_empty(fs.size("").map(|_| ())));
}

#[cfg(unix)]
#[test]
fn blocked_paths_are_forbidden_without_touching_disk() {
    let fs = GuardedFs::new();
    let forbidden = |r: Result<()>| matches!(r, Err(FioError::Guard(GuardError::Forbidden { .. })));

    assert!(forbidden(fs.write_string("/proc/guarded-fs-test", "x")));
    assert!(forbidden(fs.touch("/dev/guarded-fs-test")));
    assert!(forbidden(fs.reset("/boot/guarded-fs-test")));
    assert!(forbidden(fs.remove("/etc/")));
    assert!(forbidden(fs.create_dir("/lost+found/x")));
    assert!(forbidden(fs.create_dir("/usr")));
    assert!(forbidden(fs.read_all("/").map(|_| ())));
}

#[test]
fn file_operations_reject_directories() {
    let (dir, fs) = setup();
    let mismatch = |r: Result<()>| {
        matches!(
            r,
            Err(FioError::Guard(GuardError::KindMismatch {
                expected: PathKind::File,
                ..
            }))
        )
    };

    assert!(mismatch(fs.write_string(dir.path(), "x")));
    assert!(mismatch(fs.touch(dir.path())));
    assert!(mismatch(fs.read_all(dir.path()).map(|_| ())));
    assert!(mismatch(fs.exists(dir.path()).map(|_| ())));
    assert!(mismatch(fs.remove(dir.path())));
    assert!(mismatch(fs.size(dir.path()).map(|_| ())));
    assert!(dir.path().is_dir());
}

#[test]
fn create_dir_rejects_existing_file() {
    let (dir, fs) = setup();
    let file = dir.path().join("plain.txt");
    fs.touch(&file).unwrap();

    assert!(matches!(
        fs.create_dir(&file),
        Err(FioError::Guard(GuardError::KindMismatch {
            expected: PathKind::Directory,
            ..
        }))
    ));
}

// =============================================================================
// Open / close
// =============================================================================

#[test]
fn open_existing_and_new_file() {
    let (dir, fs) = setup();
    let existing = dir.path().join("existing.txt");
    std::fs::write(&existing, "keep").unwrap();
    let new = dir.path().join("new.txt");

    let mut a = fs.open(&existing).unwrap();
    let mut b = fs.open(&new).unwrap();
    assert!(new.exists());

    // Writes land at the end of the file
    a.write_all(b"+more").unwrap();
    fs.close(&mut a).unwrap();
    fs.close(&mut b).unwrap();
    assert_eq!(text(&fs, &existing), "keep+more");
}

#[test]
fn open_in_missing_directory_fails_with_open_error() {
    let (dir, fs) = setup();
    let path = missing_parent(&dir);

    let err = fs.open(&path).unwrap_err();
    assert_eq!(err.operation(), Some(Operation::Open));
    assert_eq!(err.path(), Some(path.as_path()));
}

#[test]
fn handle_reads_and_writes() {
    let (dir, fs) = setup();
    let path = dir.path().join("rw.txt");

    let mut handle = fs.open(&path).unwrap();
    handle.write_all(b"line\n").unwrap();
    handle.seek(SeekFrom::Start(0)).unwrap();
    let mut out = String::new();
    handle.read_to_string(&mut out).unwrap();
    assert_eq!(out, "line\n");
    assert_eq!(handle.path(), path);
    fs.close(&mut handle).unwrap();
}

#[test]
fn closing_twice_is_nil_handle() {
    let (dir, fs) = setup();
    let mut handle = fs.open(dir.path().join("once.txt")).unwrap();

    fs.close(&mut handle).unwrap();
    assert!(matches!(fs.close(&mut handle), Err(FioError::NilHandle)));
}

// =============================================================================
// Writing
// =============================================================================

#[test]
fn write_string_accumulates() {
    let (dir, fs) = setup();
    let path = dir.path().join("acc.txt");

    fs.write_string(&path, "hello").unwrap();
    fs.write_string(&path, "hello").unwrap();
    assert_eq!(text(&fs, &path), "hellohello");
}

#[test]
fn write_string_in_missing_directory_fails() {
    let (dir, fs) = setup();
    let err = fs.write_string(missing_parent(&dir), "x").unwrap_err();
    assert_eq!(err.operation(), Some(Operation::Open));
}

#[test]
fn write_single_round_trips() {
    let (dir, fs) = setup();
    let path = dir.path().join("single.txt");

    for s in ["", "x", "multi\nline\r\ntext", "ünïcödé ✓", ""] {
        fs.write_single(&path, s).unwrap();
        assert_eq!(text(&fs, &path), s);
    }
}

#[test]
fn write_single_replaces_longer_content() {
    let (dir, fs) = setup();
    let path = dir.path().join("shrink.txt");
    std::fs::write(&path, "a much longer previous content").unwrap();

    fs.write_single(&path, "short").unwrap();
    assert_eq!(text(&fs, &path), "short");
}

// =============================================================================
// Touch / reset / size
// =============================================================================

#[test]
fn touch_creates_empty_file() {
    let (dir, fs) = setup();
    let path = dir.path().join("touched.txt");

    fs.touch(&path).unwrap();
    assert!(fs.exists(&path).unwrap());
    assert_eq!(fs.size(&path).unwrap(), 0);
}

#[test]
fn touch_advances_modification_time() {
    let (dir, fs) = setup();
    let path = dir.path().join("old.txt");
    std::fs::write(&path, "content").unwrap();

    let past = SystemTime::now() - Duration::from_secs(3600);
    std::fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(past)
        .unwrap();
    let before = std::fs::metadata(&path).unwrap().modified().unwrap();

    fs.touch(&path).unwrap();
    let after = std::fs::metadata(&path).unwrap().modified().unwrap();

    assert!(after > before);
    assert_eq!(text(&fs, &path), "content");
}

#[test]
fn reset_is_idempotent() {
    let (dir, fs) = setup();
    let path = dir.path().join("reset.txt");
    fs.write_string(&path, "data").unwrap();

    fs.reset(&path).unwrap();
    assert_eq!(fs.size(&path).unwrap(), 0);
    fs.reset(&path).unwrap();
    assert!(fs.exists(&path).unwrap());
    assert_eq!(fs.size(&path).unwrap(), 0);
}

#[test]
fn reset_creates_missing_file() {
    let (dir, fs) = setup();
    let path = dir.path().join("fresh.txt");

    fs.reset(&path).unwrap();
    assert!(fs.exists(&path).unwrap());
    assert_eq!(fs.size(&path).unwrap(), 0);
}

#[test]
fn size_reports_byte_length() {
    let (dir, fs) = setup();
    let path = dir.path().join("sized.txt");
    fs.write_single(&path, "12345").unwrap();
    assert_eq!(fs.size(&path).unwrap(), 5);

    fs.write_string(&path, "é").unwrap();
    assert_eq!(fs.size(&path).unwrap(), 7);
}

#[test]
fn size_of_missing_file() {
    let (dir, fs) = setup();
    assert!(matches!(
        fs.size(dir.path().join("nothing")),
        Err(FioError::NotExistent { .. })
    ));
}

// =============================================================================
// Reading / exists / remove
// =============================================================================

#[test]
fn read_all_missing_file_is_not_existent() {
    let (dir, fs) = setup();
    let path = dir.path().join("missing.txt");

    match fs.read_all(&path) {
        Err(FioError::NotExistent { path: p }) => assert_eq!(p, path),
        other => panic!("expected NotExistent, got {other:?}"),
    }
}

#[test]
fn read_all_returns_bytes_unchanged() {
    let (dir, fs) = setup();
    let path = dir.path().join("bin.dat");
    let data = [0u8, 0xff, b'\r', b'\n', 7];
    std::fs::write(&path, data).unwrap();

    assert_eq!(fs.read_all(&path).unwrap(), data);
}

#[test]
fn exists_reports_presence() {
    let (dir, fs) = setup();
    let path = dir.path().join("e.txt");

    assert!(!fs.exists(&path).unwrap());
    fs.touch(&path).unwrap();
    assert!(fs.exists(&path).unwrap());
}

#[test]
fn exists_dir_reports_directories() {
    let (dir, fs) = setup();
    let sub = dir.path().join("sub");

    assert!(!fs.exists_dir(&sub).unwrap());
    assert!(fs.exists_dir(dir.path()).unwrap());
    fs.create_dir(&sub).unwrap();
    assert!(fs.exists_dir(&sub).unwrap());
}

#[test]
fn exists_dir_rejects_empty_path_and_files() {
    let (dir, fs) = setup();
    assert!(matches!(
        fs.exists_dir(""),
        Err(FioError::Guard(GuardError::EmptyPath))
    ));

    let file = dir.path().join("plain.txt");
    fs.touch(&file).unwrap();
    assert!(matches!(
        fs.exists_dir(&file),
        Err(FioError::Guard(GuardError::KindMismatch {
            expected: PathKind::Directory,
            ..
        }))
    ));
}

#[test]
fn remove_deletes_existing_file() {
    let (dir, fs) = setup();
    let path = dir.path().join("doomed.txt");
    fs.write_string(&path, "bye").unwrap();

    fs.remove(&path).unwrap();
    assert!(!fs.exists(&path).unwrap());
}

#[test]
fn remove_missing_file_is_not_existent() {
    let (dir, fs) = setup();
    assert!(matches!(
        fs.remove(dir.path().join("ghost.txt")),
        Err(FioError::NotExistent { .. })
    ));
}

// =============================================================================
// Append
// =============================================================================

#[test]
fn append_concatenates_and_keeps_source() {
    let (dir, fs) = setup();
    let target = dir.path().join("target.txt");
    let source = dir.path().join("source.txt");
    fs.write_single(&target, "A").unwrap();
    fs.write_single(&source, "B").unwrap();

    fs.append(&AppendRequest::new(&target, &source)).unwrap();

    assert_eq!(text(&fs, &target), "AB");
    assert_eq!(text(&fs, &source), "B");
}

#[test]
fn append_to_missing_target_copies_source() {
    let (dir, fs) = setup();
    let target = dir.path().join("new-target.txt");
    let source = dir.path().join("source.txt");
    fs.write_single(&source, "only source").unwrap();

    fs.append(&AppendRequest::new(&target, &source)).unwrap();
    assert_eq!(text(&fs, &target), "only source");
}

#[test]
fn append_rejects_absent_and_empty_arguments() {
    let (dir, fs) = setup();
    let file = dir.path().join("f.txt");
    fs.touch(&file).unwrap();

    assert!(matches!(fs.append(None), Err(FioError::NilRequest)));
    assert!(matches!(
        fs.append(&AppendRequest::new("", &file)),
        Err(FioError::Guard(GuardError::EmptyPath))
    ));
    assert!(matches!(
        fs.append(&AppendRequest::new(&file, "")),
        Err(FioError::Guard(GuardError::EmptyPath))
    ));
}

#[test]
fn append_missing_source_leaves_empty_target() {
    let (dir, fs) = setup();
    let target = dir.path().join("t.txt");
    let source = dir.path().join("absent.txt");

    let result = fs.append(&AppendRequest::new(&target, &source));

    assert!(matches!(result, Err(FioError::NotExistent { .. })));
    // No rollback of the target creation
    assert!(fs.exists(&target).unwrap());
    assert_eq!(fs.size(&target).unwrap(), 0);
}

// =============================================================================
// Directories
// =============================================================================

#[test]
fn create_dir_with_parents_and_again() {
    let (dir, fs) = setup();
    let nested = dir.path().join("a").join("b").join("c");

    fs.create_dir(&nested).unwrap();
    assert!(nested.is_dir());
    fs.create_dir(&nested).unwrap();
    assert!(fs.guard().check_dir(&nested).is_ok());
}

#[test]
fn join_then_write_in_created_directory() {
    let (dir, fs) = setup();
    let sub = dir.path().join("out");
    fs.create_dir(&sub).unwrap();

    let file = fs.join(&sub, "report.txt").unwrap();
    fs.write_single(&file, "done").unwrap();
    assert_eq!(text(&fs, &sub.join("report.txt")), "done");
}

// =============================================================================
// Scenario
// =============================================================================

#[test]
fn write_reset_remove_scenario() {
    let (dir, fs) = setup();
    let f = dir.path().join("scenario.txt");
    fs.touch(&f).unwrap();

    fs.write_string(&f, "ab").unwrap();
    fs.write_string(&f, "cd").unwrap();
    assert_eq!(text(&fs, &f), "abcd");

    fs.reset(&f).unwrap();
    assert_eq!(fs.size(&f).unwrap(), 0);

    fs.remove(&f).unwrap();
    assert!(!fs.exists(&f).unwrap());
}

#[test]
fn shared_across_threads() {
    let (dir, fs) = setup();
    let fs = std::sync::Arc::new(fs);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let fs = std::sync::Arc::clone(&fs);
            let path = dir.path().join(format!("t{i}.txt"));
            std::thread::spawn(move || {
                fs.write_single(&path, &i.to_string()).unwrap();
                String::from_utf8(fs.read_all(&path).unwrap()).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i.to_string());
    }
}
