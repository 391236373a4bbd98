//! Recursive import resolution.
//!
//! Responsibilities:
//! - Load one file (extension lookup, environment sibling, forced data).
//! - Resolve its import list, load every import concurrently, and merge.
//!
//! Invariants:
//! - Placeholders in the import list are resolved before the list is read;
//!   the rest of the document is left for the caller's final pass.
//! - Relative import paths resolve against the directory of the listing file,
//!   and the absolute paths are written back into the list.
//! - Imports merge in list order, then the listing document is applied on top.
//! - A file that appears twice on the current import chain is a cycle. The same
//!   file imported from two separate branches is not.

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use tracing::Instrument;

use super::error::LoaderError;
use super::facade::Loader;
use super::options::EffectiveOptions;
use crate::document::{Document, deep_merge, merge_documents};
use crate::extension::{extension_of, load_with_environment};

/// Absolute, lexically normalized form of `path` (no `.` or `..` components).
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl Loader {
    /// Load `path` and everything it imports. `chain` holds the ancestors of
    /// `path` on the current import branch.
    pub(super) fn load_document<'a>(
        &'a self,
        path: PathBuf,
        options: &'a EffectiveOptions,
        chain: Vec<PathBuf>,
    ) -> BoxFuture<'a, Result<Document, LoaderError>> {
        let span = tracing::debug_span!("load_file", path = %path.display(), depth = chain.len());
        async move {
            if chain.contains(&path) {
                let mut cycle = chain;
                cycle.push(path.clone());
                return Err(LoaderError::CyclicImport { path, chain: cycle });
            }

            let extension = extension_of(&path);
            let loader = self.registry.get(&extension).ok_or_else(|| {
                LoaderError::UnregisteredExtension {
                    extension: extension.clone(),
                    path: path.clone(),
                }
            })?;

            tracing::debug!(loader = loader.name(), "Loading file");
            let mut document =
                load_with_environment(loader.as_ref(), &path, options.environment.as_deref())
                    .await?;
            deep_merge(&mut document, options.data.clone());

            self.resolve_imports(document, path, options, chain).await
        }
        .instrument(span)
        .boxed()
    }

    async fn resolve_imports(
        &self,
        mut document: Document,
        path: PathBuf,
        options: &EffectiveOptions,
        chain: Vec<PathBuf>,
    ) -> Result<Document, LoaderError> {
        let key = options.imports_key.as_str();
        if !matches!(document.get(key), Some(Value::Array(_))) {
            return Ok(document);
        }

        self.resolver
            .resolve(&mut document, Some(key))
            .map_err(|source| LoaderError::Reference {
                path: path.clone(),
                source,
            })?;

        let import_paths = rewrite_import_paths(&mut document, key, &path)?;
        if import_paths.is_empty() {
            return Ok(document);
        }
        tracing::debug!(count = import_paths.len(), "Resolving imports");

        let mut child_chain = chain;
        child_chain.push(path);
        let children = try_join_all(
            import_paths
                .into_iter()
                .map(|import| self.load_document(import, options, child_chain.clone())),
        )
        .await?;

        tracing::trace!("Merging imports beneath importing document");
        Ok(merge_documents(
            children.into_iter().chain(std::iter::once(document)),
        ))
    }
}

/// Turn every entry of `document[key]` into an absolute path string and return
/// the paths in list order.
fn rewrite_import_paths(
    document: &mut Document,
    key: &str,
    path: &Path,
) -> Result<Vec<PathBuf>, LoaderError> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new("/"));
    let Some(Value::Array(entries)) = document.get_mut(key) else {
        return Err(LoaderError::InvalidImport {
            path: path.to_path_buf(),
            index: 0,
        });
    };

    let mut import_paths = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter_mut().enumerate() {
        let Value::String(raw) = entry else {
            return Err(LoaderError::InvalidImport {
                path: path.to_path_buf(),
                index,
            });
        };
        let resolved = normalize_path(&base_dir.join(raw.as_str()));
        *entry = Value::String(resolved.to_string_lossy().into_owned());
        import_paths.push(resolved);
    }
    Ok(import_paths)
}
