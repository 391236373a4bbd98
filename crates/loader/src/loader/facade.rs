//! The `Loader` facade.
//!
//! Responsibilities:
//! - Own the per-instance extension registry and reference resolver.
//! - Run a top-level load: file + imports, then the final reference pass, then
//!   output shaping.
//!
//! Invariants:
//! - Every call builds its documents from scratch; nothing is cached across loads.
//! - A load either fully succeeds or fails with the first error encountered.

use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use tracing::Instrument;

use super::builder::LoaderBuilder;
use super::error::LoaderError;
use super::imports::normalize_path;
use super::options::{LoadOptions, LoaderOptions};
use crate::document::Document;
use crate::extension::{ExtensionLoader, ExtensionRegistry};
use crate::flatten::{FlatDocument, LoadOutput};
use crate::reference::ReferenceResolver;

/// Loads configuration files with environment overrides, imports and references.
pub struct Loader {
    pub(super) options: LoaderOptions,
    pub(super) registry: ExtensionRegistry,
    pub(super) resolver: Arc<dyn ReferenceResolver>,
}

/// Create a loader from an options record, with `.json` registered.
pub fn create_loader(options: LoaderOptions) -> Loader {
    LoaderBuilder::from_options(options).build()
}

impl Default for Loader {
    fn default() -> Self {
        LoaderBuilder::new().build()
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Loader {
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    pub(super) fn from_parts(
        options: LoaderOptions,
        registry: ExtensionRegistry,
        resolver: Arc<dyn ReferenceResolver>,
    ) -> Self {
        Self {
            options,
            registry,
            resolver,
        }
    }

    /// Defaults applied to every load. `resolver_options` only take effect
    /// when the loader uses the default resolver.
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Register `loader` for `extension` (with or without the leading dot),
    /// replacing any loader previously registered for it.
    pub fn register_extension_loader<L>(&mut self, extension: &str, loader: L) -> &mut Self
    where
        L: ExtensionLoader + 'static,
    {
        self.registry.register(extension, Arc::new(loader));
        self
    }

    pub fn get_extension_loader(&self, extension: &str) -> Option<Arc<dyn ExtensionLoader>> {
        self.registry.get(extension)
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> Vec<&str> {
        self.registry.extensions().collect()
    }

    /// Load `path` with the loader's default options.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<LoadOutput, LoaderError> {
        self.load_with(path, LoadOptions::default()).await
    }

    /// Load `path` with per-call overrides.
    pub async fn load_with(
        &self,
        path: impl AsRef<Path>,
        options: LoadOptions,
    ) -> Result<LoadOutput, LoaderError> {
        let path = normalize_path(path.as_ref());
        let options = self.options.effective(options);
        let span = tracing::info_span!("load", path = %path.display());

        async {
            let mut document = self.load_document(path.clone(), &options, Vec::new()).await?;
            // An import list still present was finalized by the import pass.
            let imports_key = options.imports_key.as_str();
            let resolved = if matches!(document.get(imports_key), Some(Value::Array(_))) {
                self.resolver.resolve_except(&mut document, imports_key)
            } else {
                self.resolver.resolve(&mut document, None)
            };
            resolved.map_err(|source| LoaderError::Reference {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(keys = document.len(), "Load complete");

            Ok::<_, LoaderError>(if options.flatten_output {
                LoadOutput::Flattened(FlatDocument::new(document))
            } else {
                LoadOutput::Document(document)
            })
        }
        .instrument(span)
        .await
    }

    /// Load `path` and its imports without the final reference pass.
    ///
    /// Placeholders outside import lists are left untouched and the output is
    /// never flattened.
    pub async fn load_raw(
        &self,
        path: impl AsRef<Path>,
        options: LoadOptions,
    ) -> Result<Document, LoaderError> {
        let path = normalize_path(path.as_ref());
        let options = self.options.effective(options);
        self.load_document(path, &options, Vec::new()).await
    }
}
