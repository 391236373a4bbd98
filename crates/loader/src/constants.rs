//! Centralized constants for the layerconf loader.
//!
//! Responsibilities:
//! - Define default option values (imports key, built-in extensions).
//! - Define the environment variable names read by `LoaderBuilder::from_env`.
//!
//! Does NOT handle:
//! - Reading or parsing environment variables (see `loader/env.rs`).

/// Default key under which a document lists the files it imports.
pub const DEFAULT_IMPORTS_KEY: &str = "imports";

/// Separator placed between a file stem and its environment suffix
/// (`config.json` + `test` -> `config_test.json`).
pub const ENVIRONMENT_SEPARATOR: &str = "_";

/// Namespace that maps to the process environment in reference placeholders.
pub const PROCESS_ENV_NAMESPACE: &str = "env";

/// Environment variable selecting the environment suffix.
pub const ENV_ENVIRONMENT: &str = "LAYERCONF_ENV";

/// Environment variable overriding the imports key.
pub const ENV_IMPORTS_KEY: &str = "LAYERCONF_IMPORTS_KEY";

/// Environment variable toggling flattened output (`true`/`false`).
pub const ENV_FLATTEN: &str = "LAYERCONF_FLATTEN";

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
