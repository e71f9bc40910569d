//! End-to-end tests: build a real zip on disk, load it, drive a session.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use vfsh::{Session, ShellConfig};

// ============================================================================
// Helpers
// ============================================================================

enum Member<'a> {
    Dir(&'a str),
    File(&'a str, &'a [u8]),
}

fn write_zip(dir: &Path, name: &str, members: &[Member<'_>]) -> PathBuf {
    let path = dir.join(name);
    let file = fs::File::create(&path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for member in members {
        match member {
            Member::Dir(name) => zip.add_directory(*name, options).unwrap(),
            Member::File(name, data) => {
                zip.start_file(*name, options).unwrap();
                zip.write_all(data).unwrap();
            }
        }
    }
    zip.finish().unwrap();
    path
}

fn sample_zip(dir: &Path) -> PathBuf {
    write_zip(
        dir,
        "vfs.zip",
        &[
            Member::Dir("root/"),
            Member::File("root/a.txt", b"alpha"),
            Member::Dir("root/dir/"),
            Member::File("root/dir/b.txt", b"beta"),
            Member::File("root/dir/blob.bin", b"\xff\xfe\x00\x01"),
        ],
    )
}

fn session_for(vfs: Option<PathBuf>, script: Option<PathBuf>) -> Session {
    Session::new(ShellConfig::new(vfs, script).with_user("tester"))
}

/// Output of `line` without the echoed command.
fn run(session: &mut Session, line: &str) -> Vec<String> {
    session.submit(line).lines().into_iter().skip(1).collect()
}

// ============================================================================
// Archive loading
// ============================================================================

#[test]
fn test_load_strips_common_prefix() {
    let tmp = TempDir::new().unwrap();
    let zip = sample_zip(tmp.path());
    let mut session = session_for(Some(zip.clone()), None);

    let lines: Vec<String> = session
        .load_configured_archive()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(lines[0], "Common prefix: 'root/'");
    assert_eq!(lines[1], format!("VFS loaded from {}", zip.display()));
    assert_eq!(lines[2], "Files in VFS: 4 entries");

    let fs = session.engine().fs();
    assert!(fs.is_file("a.txt"));
    assert!(fs.get("dir/").is_some_and(|e| e.is_directory()));
    assert!(fs.get("root/a.txt").is_none());

    assert_eq!(run(&mut session, "ls"), vec!["a.txt dir"]);
    assert_eq!(
        run(&mut session, "find / *.txt"),
        vec!["/a.txt", "/dir/b.txt"]
    );
}

#[test]
fn test_member_names_are_canonicalized() {
    let tmp = TempDir::new().unwrap();
    let zip = write_zip(
        tmp.path(),
        "slashes.zip",
        &[
            Member::File("/etc/x.txt", b"x"),
            Member::File("docs//readme.md", b"r"),
            Member::File("b.txt", b"b"),
        ],
    );
    let mut session = session_for(Some(zip), None);
    session.load_configured_archive();

    let keys: Vec<&str> = session.engine().fs().keys().collect();
    assert_eq!(keys, vec!["b.txt", "docs/readme.md", "etc/x.txt"]);

    assert_eq!(run(&mut session, "ls"), vec!["b.txt docs etc"]);
    assert_eq!(
        run(&mut session, "find / *"),
        vec!["/b.txt", "/docs/readme.md", "/etc/x.txt"]
    );
    assert_eq!(run(&mut session, "cd /etc"), vec!["Changed VFS directory to /etc/"]);
}

#[test]
fn test_prefix_only_archive_reports_empty() {
    let tmp = TempDir::new().unwrap();
    let zip = write_zip(tmp.path(), "bare.zip", &[Member::Dir("root/")]);
    let mut session = session_for(Some(zip), None);

    let lines: Vec<String> = session
        .load_configured_archive()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(lines, vec!["Common prefix: 'root/'", "Empty VFS archive"]);
    assert!(session.engine().fs().is_empty());
}

#[test]
fn test_binary_member_round_trips() {
    let tmp = TempDir::new().unwrap();
    let mut session = session_for(Some(sample_zip(tmp.path())), None);
    session.load_configured_archive();

    let content = session
        .engine()
        .fs()
        .get("dir/blob.bin")
        .and_then(|e| e.content())
        .unwrap();
    assert!(content.is_binary());
    assert_eq!(content.to_bytes().unwrap(), vec![0xff, 0xfe, 0x00, 0x01]);

    let text = session.engine().fs().get("a.txt").and_then(|e| e.content()).unwrap();
    assert!(!text.is_binary());
    assert_eq!(text.as_str(), "alpha");
}

#[test]
fn test_invalid_zip_reports_format_error() {
    let tmp = TempDir::new().unwrap();
    let bogus = tmp.path().join("bogus.zip");
    fs::write(&bogus, b"this is not a zip archive").unwrap();
    let mut session = session_for(Some(bogus.clone()), None);

    let lines = session.load_configured_archive();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].is_error());
    assert_eq!(
        lines[0].to_string(),
        format!("Error: Invalid ZIP format: {}", bogus.display())
    );
    assert!(session.engine().fs().is_empty());
}

#[test]
fn test_empty_archive_loads_nothing() {
    let tmp = TempDir::new().unwrap();
    let zip = write_zip(tmp.path(), "empty.zip", &[]);
    let mut session = session_for(Some(zip), None);

    let lines: Vec<String> = session
        .load_configured_archive()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(lines, vec!["Empty VFS archive"]);
    assert!(session.engine().fs().is_empty());
}

// ============================================================================
// vfs-init
// ============================================================================

#[test]
fn test_vfs_init_clears_store_and_removes_archive() {
    let tmp = TempDir::new().unwrap();
    let zip = sample_zip(tmp.path());
    let mut session = session_for(Some(zip.clone()), None);
    session.load_configured_archive();
    run(&mut session, "cd dir");

    let lines = run(&mut session, "vfs-init");
    assert_eq!(
        lines,
        vec![
            "VFS initialized to empty state".to_string(),
            format!("Physical VFS file removed: {}", zip.display()),
        ]
    );
    assert!(!zip.exists());
    assert!(session.engine().fs().is_empty());
    assert_eq!(session.engine().current_dir(), "");

    // Running it again with the file already gone only resets the store
    assert_eq!(run(&mut session, "vfs-init"), vec!["VFS initialized to empty state"]);
}

// ============================================================================
// Startup script
// ============================================================================

#[test]
fn test_startup_script_runs_each_line() {
    let tmp = TempDir::new().unwrap();
    let zip = sample_zip(tmp.path());
    let script = tmp.path().join("startup.txt");
    fs::write(&script, "# setup\n\ncd dir\ntouch new.txt\npwd\n").unwrap();

    let mut session = session_for(Some(zip), Some(script));
    session.load_configured_archive();
    let result = session.run_configured_script();

    assert_eq!(
        result.lines(),
        vec![
            "> cd dir",
            "Changed VFS directory to /dir/",
            "> touch new.txt",
            "> pwd",
            "/dir",
        ]
    );
    assert!(!result.exit);

    let created = session.engine().fs().get("dir/new.txt").unwrap();
    assert_eq!(created.owner(), Some("tester"));
    assert!(created.mtime().is_some());
    // Script lines do not enter interactive history
    assert!(session.command_history().is_empty());
}

#[test]
fn test_startup_script_exit_stops_execution() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("startup.txt");
    fs::write(&script, "exit\ntouch never.txt\n").unwrap();

    let mut session = session_for(None, Some(script));
    let result = session.run_configured_script();

    assert!(result.exit);
    assert_eq!(result.lines(), vec!["> exit"]);
}

#[test]
fn test_chown_recursive_after_load() {
    let tmp = TempDir::new().unwrap();
    let mut session = session_for(Some(sample_zip(tmp.path())), None);
    session.load_configured_archive();

    assert_eq!(
        run(&mut session, "chown -R bob dir"),
        vec!["chown: changed ownership of 3 entries to 'bob'"]
    );
    let fs = session.engine().fs();
    assert_eq!(fs.get("dir/b.txt").and_then(|e| e.owner()), Some("bob"));
    assert_eq!(fs.get("a.txt").and_then(|e| e.owner()), None);
}
