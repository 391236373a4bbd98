//! Loading a file together with its environment-specific sibling.
//!
//! For `config.json` and environment `test`, the sibling is `config_test.json`
//! in the same directory. When the sibling exists it is loaded alongside the
//! base file and merged over it.
//!
//! Invariants:
//! - Base and sibling loads are issued together and joined; the first failure wins.
//! - A missing sibling is not an error. A sibling that exists but fails to load
//!   is, and so is a sibling whose existence cannot be checked.
//! - An empty environment name means "no environment".

use std::path::{Path, PathBuf};

use super::ExtensionLoader;
use crate::constants::ENVIRONMENT_SEPARATOR;
use crate::document::{Document, deep_merge};
use crate::loader::LoaderError;

/// Path of the `environment` sibling of `path`.
pub fn environment_sibling(path: &Path, environment: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let mut name = format!("{stem}{ENVIRONMENT_SEPARATOR}{environment}");
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// Load `path` with `loader`, merging its environment sibling over it if present.
pub async fn load_with_environment(
    loader: &dyn ExtensionLoader,
    path: &Path,
    environment: Option<&str>,
) -> Result<Document, LoaderError> {
    let base = async {
        loader.load(path).await.map_err(|source| LoaderError::Load {
            path: path.to_path_buf(),
            source,
        })
    };

    let sibling = async {
        let Some(environment) = environment.filter(|env| !env.is_empty()) else {
            return Ok(None);
        };
        let sibling = environment_sibling(path, environment);
        match tokio::fs::try_exists(&sibling).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::trace!(sibling = %sibling.display(), "No environment sibling");
                return Ok(None);
            }
            Err(e) => {
                return Err(LoaderError::Load {
                    path: sibling,
                    source: e.into(),
                });
            }
        }
        tracing::debug!(sibling = %sibling.display(), environment, "Loading environment sibling");
        loader
            .load(&sibling)
            .await
            .map(Some)
            .map_err(|source| LoaderError::Load {
                path: sibling,
                source,
            })
    };

    let (mut document, overlay) = futures::try_join!(base, sibling)?;
    if let Some(overlay) = overlay {
        deep_merge(&mut document, overlay);
    }
    Ok(document)
}
