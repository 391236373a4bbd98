//! Environment variable tests for the loader builder.
//!
//! Responsibilities:
//! - Test `LAYERCONF_*` variables feeding builder defaults.
//! - Test that explicit builder values win over environment variables.
//! - Test `${env:...}` placeholders reading the process environment.

use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;

use super::{env_lock, write_json};
use crate::loader::{LoaderBuilder, LoaderError};

#[test]
#[serial]
fn test_from_env_sets_defaults() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [
            ("LAYERCONF_ENV", Some("staging")),
            ("LAYERCONF_IMPORTS_KEY", Some(" include ")),
            ("LAYERCONF_FLATTEN", Some("true")),
        ],
        || {
            let options = LoaderBuilder::new().from_env().unwrap().options();
            assert_eq!(options.environment.as_deref(), Some("staging"));
            assert_eq!(options.imports_key, "include");
            assert!(options.flatten_output);
        },
    );
}

#[test]
#[serial]
fn test_builder_values_win_over_env() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [
            ("LAYERCONF_ENV", Some("staging")),
            ("LAYERCONF_FLATTEN", Some("true")),
        ],
        || {
            let options = LoaderBuilder::new()
                .with_environment("test")
                .with_flatten_output(false)
                .from_env()
                .unwrap()
                .options();
            assert_eq!(options.environment.as_deref(), Some("test"));
            assert!(!options.flatten_output);
        },
    );
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [
            ("LAYERCONF_ENV", Some("")),
            ("LAYERCONF_IMPORTS_KEY", Some("   ")),
            ("LAYERCONF_FLATTEN", None),
        ],
        || {
            let options = LoaderBuilder::new().from_env().unwrap().options();
            assert!(options.environment.is_none());
            assert_eq!(options.imports_key, "imports");
            assert!(!options.flatten_output);
        },
    );
}

#[test]
#[serial]
fn test_invalid_flatten_value_is_error() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars([("LAYERCONF_FLATTEN", Some("sometimes"))], || {
        let result = LoaderBuilder::new().from_env();
        match result {
            Err(LoaderError::InvalidValue { var, .. }) => assert_eq!(var, "LAYERCONF_FLATTEN"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    });
}

#[test]
#[serial]
fn test_env_placeholders_in_imports_and_values() {
    let _lock = env_lock().lock().unwrap();
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "shared/base.json", json!({"from_base": true}));
    let root = write_json(
        dir.path(),
        "root.json",
        json!({
            "imports": ["${env:_LAYERCONF_TEST_SHARED}/base.json"],
            "user": "${env:_LAYERCONF_TEST_USER:-nobody}"
        }),
    );
    let shared = dir.path().join("shared");

    temp_env::with_vars(
        [
            ("_LAYERCONF_TEST_SHARED", Some(shared.to_str().unwrap())),
            ("_LAYERCONF_TEST_USER", None),
        ],
        || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let output = runtime
                .block_on(LoaderBuilder::new().build().load(&root))
                .unwrap();
            assert_eq!(output.get("from_base"), Some(&json!(true)));
            assert_eq!(output.get("user"), Some(&json!("nobody")));
        },
    );
}
