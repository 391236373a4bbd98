//! Tests for the loader facade, import engine and builder.
//!
//! Invariants:
//! - Tests that touch process-global state (env vars, cwd) use `serial_test`
//!   and `env_lock()`.
//! - Fixtures live in `tempfile` directories that are cleaned up automatically.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::document::Document;

pub mod env_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write `value` as JSON to `dir/name` and return the path.
pub fn write_json(dir: &Path, name: &str, value: Value) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

/// Unwrap a `json!` object literal into a `Document`.
pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// Absolute path of `dir/name` as a JSON string value.
pub fn abs(dir: &Path, name: &str) -> Value {
    Value::String(dir.join(name).to_string_lossy().into_owned())
}
