//! Per-file-type loaders and their registry.
//!
//! Responsibilities:
//! - Define the `ExtensionLoader` contract: turn one path into one `Document`.
//! - Provide the built-in JSON and YAML loaders and a closure adapter.
//! - Keep the per-instance extension registry.
//! - Load a file together with its environment-specific sibling.
//!
//! Does NOT handle:
//! - Imports or references (see `loader/imports.rs` and `reference/`).
//!
//! Invariants:
//! - Registered extensions are always normalized (leading `.`, lowercase).
//! - Loaders never see a path the registry did not route to them.

mod builtin;
mod registry;
mod variant;

use async_trait::async_trait;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::document::Document;

pub use builtin::{FileError, JsonLoader, YamlLoader};
pub use registry::{ExtensionRegistry, extension_of, normalize_extension};
pub use variant::{environment_sibling, load_with_environment};

/// Boxed error returned by extension loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Produces a `Document` from a file path.
#[async_trait]
pub trait ExtensionLoader: Send + Sync {
    /// Load and parse the file at `path`.
    async fn load(&self, path: &Path) -> Result<Document, BoxError>;

    /// Short name used in log output.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Adapts an async closure into an `ExtensionLoader`.
pub struct FnLoader<F> {
    f: F,
}

/// Wrap `f` so it can be registered as an extension loader.
pub fn from_fn<F, Fut>(f: F) -> FnLoader<F>
where
    F: Fn(PathBuf) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Document, BoxError>> + Send + 'static,
{
    FnLoader { f }
}

#[async_trait]
impl<F, Fut> ExtensionLoader for FnLoader<F>
where
    F: Fn(PathBuf) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Document, BoxError>> + Send + 'static,
{
    async fn load(&self, path: &Path) -> Result<Document, BoxError> {
        (self.f)(path.to_path_buf()).await
    }

    fn name(&self) -> &str {
        "fn"
    }
}
