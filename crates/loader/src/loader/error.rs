//! Error types for loading.
//!
//! Responsibilities:
//! - Define error variants for every way a load can fail.
//! - Define the configuration errors raised while building a loader from the
//!   environment.
//!
//! Invariants:
//! - Every file-related variant carries the offending path.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::extension::BoxError;
use crate::reference::ReferenceError;

/// Errors that can occur while building a loader or loading a file.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("No extension loader registered for '{extension}' (file: {path})")]
    UnregisteredExtension { extension: String, path: PathBuf },

    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Failed to resolve references in {path}: {source}")]
    Reference {
        path: PathBuf,
        #[source]
        source: ReferenceError,
    },

    #[error("Import cycle detected at {path}: {}", format_chain(chain))]
    CyclicImport { path: PathBuf, chain: Vec<PathBuf> },

    #[error("Import #{index} in {path} is not a file path string")]
    InvalidImport { path: PathBuf, index: usize },

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: only the byte index of the failure is kept, never the line.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl LoaderError {
    /// Path of the file the error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LoaderError::UnregisteredExtension { path, .. }
            | LoaderError::Load { path, .. }
            | LoaderError::Reference { path, .. }
            | LoaderError::CyclicImport { path, .. }
            | LoaderError::InvalidImport { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_extension_message_names_extension_and_file() {
        let err = LoaderError::UnregisteredExtension {
            extension: ".yaml".to_string(),
            path: PathBuf::from("/etc/app/config.yaml"),
        };
        let msg = err.to_string();
        assert!(msg.contains(".yaml"));
        assert!(msg.contains("/etc/app/config.yaml"));
        assert_eq!(err.path(), Some(std::path::Path::new("/etc/app/config.yaml")));
    }

    #[test]
    fn test_cycle_message_lists_chain() {
        let err = LoaderError::CyclicImport {
            path: PathBuf::from("/a.json"),
            chain: vec![
                PathBuf::from("/a.json"),
                PathBuf::from("/b.json"),
                PathBuf::from("/a.json"),
            ],
        };
        assert!(err.to_string().contains("/a.json -> /b.json -> /a.json"));
    }

    #[test]
    fn test_dotenv_errors_have_no_path() {
        assert!(LoaderError::DotenvUnknown.path().is_none());
    }
}
