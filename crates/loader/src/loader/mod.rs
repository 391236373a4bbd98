//! Loader facade, import resolution and configuration.
//!
//! Responsibilities:
//! - Expose `Loader`, the entry point that ties extension loading, imports and
//!   reference resolution together.
//! - Provide a builder-pattern `LoaderBuilder` fed from code, environment
//!   variables and `.env` files.
//! - Recursively resolve and merge imported documents.
//!
//! Does NOT handle:
//! - Parsing individual files (see `extension/`).
//! - Placeholder syntax (see `reference/`).
//!
//! Invariants / Assumptions:
//! - Merge precedence, lowest to highest: earlier import < later import <
//!   importing document < forced data.
//! - Import paths are resolved against the directory of the file that lists them.
//! - The whole-document reference pass runs once, after all imports are merged.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod facade;
mod imports;
mod options;

pub use builder::LoaderBuilder;
pub use env::env_var_or_none;
pub use error::LoaderError;
pub use facade::{Loader, create_loader};
pub use options::{LoadOptions, LoaderOptions};

#[cfg(test)]
mod tests;
