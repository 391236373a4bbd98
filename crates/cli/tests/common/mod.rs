//! Shared test utilities for layerconf integration tests.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// Returns a hermetic `layerconf` command for integration testing.
///
/// `DOTENV_DISABLED=1` prevents local `.env` contamination and every
/// `LAYERCONF_*` variable from the host is cleared.
pub fn layerconf_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("layerconf");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("LAYERCONF_ENV")
        .env_remove("LAYERCONF_IMPORTS_KEY")
        .env_remove("LAYERCONF_FLATTEN")
        .env_remove("RUST_LOG");

    cmd
}

/// Write `contents` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}
