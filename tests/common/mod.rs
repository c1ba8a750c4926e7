//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
#[allow(dead_code)]
pub fn write_config(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

/// Split a log line into its tab-separated fields.
#[allow(dead_code)]
pub fn line_fields(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

/// True when `value` matches the `YYYY-MM-DD HH:MM:SS` log timestamp.
#[allow(dead_code)]
pub fn is_log_timestamp(value: &str) -> bool {
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
}
