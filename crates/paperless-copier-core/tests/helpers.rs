#![allow(dead_code)]

use filetime::FileTime;
use paperless_copier_core::Settings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Helper function to set up a test environment with an empty source folder
/// and an empty consume folder.
pub fn setup_test_env() -> (tempfile::TempDir, Settings) {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let source_dir = temp_dir.path().join("scans");
    let dest_dir = temp_dir.path().join("consume");
    fs::create_dir_all(&source_dir).unwrap();
    fs::create_dir_all(&dest_dir).unwrap();

    let settings = Settings { source_dir, dest_dir };
    (temp_dir, settings)
}

/// Helper function to initialize the tracing subscriber for tests.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Writes `rel` under `root`, creating parent folders.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

/// Pins the last-access time of `path` to a unix timestamp.
pub fn set_access_time(path: &Path, unix_secs: i64) {
    filetime::set_file_atime(path, FileTime::from_unix_time(unix_secs, 0)).unwrap();
}

pub fn one_hour_from_now() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

/// 2020-01-01T00:00:00Z
pub const LONG_AGO: i64 = 1_577_836_800;
