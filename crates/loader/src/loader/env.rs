//! Environment variable parsing for loader configuration.
//!
//! Responsibilities:
//! - Read `LAYERCONF_*` variables and apply them to a `LoaderBuilder`.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - `.env` file loading (handled by `LoaderBuilder::load_dotenv`).
//! - `${env:NAME}` placeholders (handled by the reference resolver at load time).
//!
//! Invariants:
//! - Values already set on the builder are never overwritten.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean values return `LoaderError::InvalidValue`.

use super::builder::LoaderBuilder;
use super::error::LoaderError;
use crate::constants::{ENV_ENVIRONMENT, ENV_FLATTEN, ENV_IMPORTS_KEY};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply `LAYERCONF_*` environment variables to the builder.
pub fn apply_env(builder: &mut LoaderBuilder) -> Result<(), LoaderError> {
    if builder.environment().is_none()
        && let Some(environment) = env_var_or_none(ENV_ENVIRONMENT)
    {
        builder.set_environment(Some(environment));
    }
    if builder.imports_key().is_none()
        && let Some(key) = env_var_or_none(ENV_IMPORTS_KEY)
    {
        builder.set_imports_key(Some(key));
    }
    if builder.flatten_output().is_none()
        && let Some(flatten) = env_var_or_none(ENV_FLATTEN)
    {
        let value = parse_bool(&flatten).ok_or_else(|| LoaderError::InvalidValue {
            var: ENV_FLATTEN.to_string(),
            message: "must be true or false".to_string(),
        })?;
        builder.set_flatten_output(Some(value));
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key = "_LAYERCONF_TEST_VAR";
        assert!(env_var_or_none(key).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key, Some(""))], || {
            assert!(env_var_or_none(key).is_none());
        });
        temp_env::with_vars([(key, Some("   "))], || {
            assert!(env_var_or_none(key).is_none());
        });
        temp_env::with_vars([(key, Some(" value "))], || {
            assert_eq!(env_var_or_none(key), Some("value".to_string()));
        });
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
