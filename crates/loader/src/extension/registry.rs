//! Per-instance registry mapping file extensions to loaders.
//!
//! Invariants:
//! - Keys are normalized: `json`, `.json` and `.JSON` all name `.json`.
//! - Registering an extension again replaces the previous loader.
//! - Files without an extension map to the empty extension, which is never
//!   registered by default.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::ExtensionLoader;

/// Normalize an extension to its registry key (`"JSON"` -> `".json"`).
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return String::new();
    }
    format!(".{}", trimmed.to_ascii_lowercase())
}

/// The normalized extension of `path`, or an empty string if it has none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Extension-to-loader mapping owned by a single `Loader`.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    loaders: BTreeMap<String, Arc<dyn ExtensionLoader>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `loader` for `extension`, returning the loader it replaced.
    pub fn register(
        &mut self,
        extension: &str,
        loader: Arc<dyn ExtensionLoader>,
    ) -> Option<Arc<dyn ExtensionLoader>> {
        let key = normalize_extension(extension);
        tracing::debug!(extension = %key, loader = loader.name(), "Registering extension loader");
        self.loaders.insert(key, loader)
    }

    pub fn get(&self, extension: &str) -> Option<Arc<dyn ExtensionLoader>> {
        self.loaders.get(&normalize_extension(extension)).cloned()
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.loaders.contains_key(&normalize_extension(extension))
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.loaders.iter().map(|(ext, loader)| (ext, loader.name())))
            .finish()
    }
}
