//! Reference placeholder resolution.
//!
//! Responsibilities:
//! - Define the `ReferenceResolver` contract used by the loader: a whole-document
//!   pass and a single-key pass, both rewriting placeholders in place, plus a
//!   whole-document pass that skips an already finalized key.
//! - Provide `PlaceholderResolver`, the default implementation.
//!
//! Placeholder syntax understood by `PlaceholderResolver`:
//! - `${server.port}`: value at a path in the document being resolved.
//! - `${ns:path}`: value at `path` inside the global namespace `ns`.
//! - `${env:HOME}`: process environment variable (when enabled).
//! - `${ref:-fallback}`: literal fallback used when the reference is missing.
//!
//! Invariants:
//! - A string that is exactly one placeholder takes the referenced value's type.
//! - Resolving an already resolved document changes nothing, unless a
//!   substituted global or environment value itself contains `${`. Within one
//!   load no value is scanned twice.

mod error;
mod placeholder;
mod resolver;

use serde::{Deserialize, Serialize};

use crate::document::Document;

pub use error::ReferenceError;
pub use placeholder::{Part, Placeholder, Template, contains_placeholder};
pub use resolver::PlaceholderResolver;

/// Rewrites reference placeholders inside a document.
pub trait ReferenceResolver: Send + Sync {
    /// Resolve placeholders in `document[key]` only, or in the whole document
    /// when `key` is `None`. Lookups may read anywhere in `document`.
    fn resolve(&self, document: &mut Document, key: Option<&str>) -> Result<(), ReferenceError>;

    /// Whole-document pass that leaves `document[finalized]` exactly as it is.
    ///
    /// The default implementation hides the finalized entry from `resolve`
    /// and restores it in its original position afterwards.
    fn resolve_except(
        &self,
        document: &mut Document,
        finalized: &str,
    ) -> Result<(), ReferenceError> {
        let order: Vec<String> = document.keys().cloned().collect();
        let Some(kept) = document.remove(finalized) else {
            return self.resolve(document, None);
        };
        let result = self.resolve(document, None);

        let mut rest = std::mem::take(document);
        let mut kept = Some(kept);
        for key in order {
            let value = if key == finalized { kept.take() } else { rest.remove(&key) };
            if let Some(value) = value {
                document.insert(key, value);
            }
        }
        // Keys a custom resolver added go last.
        document.extend(rest);
        result
    }
}

/// Options handed to the resolver when a loader is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverOptions {
    /// Named namespaces addressable as `${name:path}`.
    pub globals: Document,
    /// Expose the process environment as the `env` namespace.
    pub process_env: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            globals: Document::new(),
            process_env: true,
        }
    }
}
