//! Loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `LoaderBuilder` for assembling loader defaults.
//! - Support configuration from environment variables, `.env` files and
//!   direct builder methods.
//! - Register extension loaders and pick the reference resolver.
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `.json` is always registered; `.yaml`/`.yml` only after `with_yaml()`.
//! - `load_dotenv()` must be called explicitly; `DOTENV_DISABLED` is checked first.

use serde_json::Value;
use std::sync::Arc;

use super::env::apply_env;
use super::error::LoaderError;
use super::facade::Loader;
use super::options::LoaderOptions;
use crate::constants::{DEFAULT_IMPORTS_KEY, ENV_DOTENV_DISABLED};
use crate::document::{Document, deep_merge};
use crate::extension::{ExtensionLoader, ExtensionRegistry, JsonLoader, YamlLoader};
use crate::reference::{PlaceholderResolver, ReferenceResolver, ResolverOptions};

/// Builds a `Loader` from code, environment variables and `.env` files.
pub struct LoaderBuilder {
    environment: Option<String>,
    data: Document,
    imports_key: Option<String>,
    resolver_options: ResolverOptions,
    flatten_output: Option<bool>,
    yaml: bool,
    resolver: Option<Arc<dyn ReferenceResolver>>,
    extension_loaders: Vec<(String, Arc<dyn ExtensionLoader>)>,
}

impl Default for LoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderBuilder {
    pub fn new() -> Self {
        Self {
            environment: None,
            data: Document::new(),
            imports_key: None,
            resolver_options: ResolverOptions::default(),
            flatten_output: None,
            yaml: false,
            resolver: None,
            extension_loaders: Vec::new(),
        }
    }

    /// Start from a full options record.
    pub fn from_options(options: LoaderOptions) -> Self {
        Self {
            environment: options.environment,
            data: options.data,
            imports_key: Some(options.imports_key),
            resolver_options: options.resolver_options,
            flatten_output: Some(options.flatten_output),
            ..Self::new()
        }
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// Missing `.env` files are silently ignored. Parse and I/O failures are
    /// reported without any of the file's content.
    pub fn load_dotenv(self) -> Result<Self, LoaderError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if e.not_found() => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(LoaderError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(LoaderError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(LoaderError::DotenvUnknown),
        }
    }

    /// Read defaults from `LAYERCONF_*` environment variables.
    ///
    /// Values already set on the builder are kept.
    pub fn from_env(mut self) -> Result<Self, LoaderError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Deep-merge `data` into the forced data.
    pub fn with_data(mut self, data: Document) -> Self {
        deep_merge(&mut self.data, data);
        self
    }

    pub fn with_imports_key(mut self, key: impl Into<String>) -> Self {
        self.imports_key = Some(key.into());
        self
    }

    pub fn with_resolver_options(mut self, options: ResolverOptions) -> Self {
        self.resolver_options = options;
        self
    }

    /// Expose `value` to placeholders as the `${namespace:...}` namespace.
    pub fn with_global(mut self, namespace: impl Into<String>, value: Value) -> Self {
        self.resolver_options.globals.insert(namespace.into(), value);
        self
    }

    pub fn with_process_env(mut self, enabled: bool) -> Self {
        self.resolver_options.process_env = enabled;
        self
    }

    pub fn with_flatten_output(mut self, flatten: bool) -> Self {
        self.flatten_output = Some(flatten);
        self
    }

    /// Register the YAML loader for `.yaml` and `.yml`.
    pub fn with_yaml(mut self) -> Self {
        self.yaml = true;
        self
    }

    /// Replace the default placeholder resolver.
    ///
    /// `resolver_options` (including globals and the process env switch) only
    /// configure the default resolver. With a custom resolver they are still
    /// reported by `Loader::options()` but nothing reads them; configure the
    /// custom resolver directly instead.
    pub fn with_resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_extension_loader(
        mut self,
        extension: impl Into<String>,
        loader: Arc<dyn ExtensionLoader>,
    ) -> Self {
        self.extension_loaders.push((extension.into(), loader));
        self
    }

    pub(crate) fn environment(&self) -> Option<&String> {
        self.environment.as_ref()
    }

    pub(crate) fn set_environment(&mut self, environment: Option<String>) {
        self.environment = environment;
    }

    pub(crate) fn imports_key(&self) -> Option<&String> {
        self.imports_key.as_ref()
    }

    pub(crate) fn set_imports_key(&mut self, key: Option<String>) {
        self.imports_key = key;
    }

    pub(crate) fn flatten_output(&self) -> Option<bool> {
        self.flatten_output
    }

    pub(crate) fn set_flatten_output(&mut self, flatten: Option<bool>) {
        self.flatten_output = flatten;
    }

    /// The options record this builder would produce.
    pub fn options(&self) -> LoaderOptions {
        LoaderOptions {
            environment: self.environment.clone(),
            data: self.data.clone(),
            imports_key: self
                .imports_key
                .clone()
                .unwrap_or_else(|| DEFAULT_IMPORTS_KEY.to_string()),
            resolver_options: self.resolver_options.clone(),
            flatten_output: self.flatten_output.unwrap_or(false),
        }
    }

    pub fn build(self) -> Loader {
        let options = self.options();
        let resolver = self.resolver.unwrap_or_else(|| {
            Arc::new(PlaceholderResolver::new(options.resolver_options.clone()))
        });

        let mut registry = ExtensionRegistry::new();
        registry.register(".json", Arc::new(JsonLoader));
        if self.yaml {
            registry.register(".yaml", Arc::new(YamlLoader));
            registry.register(".yml", Arc::new(YamlLoader));
        }
        for (extension, loader) in self.extension_loaders {
            registry.register(&extension, loader);
        }

        Loader::from_parts(options, registry, resolver)
    }
}
