//! Built-in JSON and YAML extension loaders.
//!
//! Invariants:
//! - The top-level value of every file must be a mapping.
//! - Errors always carry the offending path; parse errors keep the parser's
//!   position information.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{BoxError, ExtensionLoader};
use crate::document::Document;

/// Errors raised by the built-in loaders.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Top-level value in {path} is {found}, expected a mapping")]
    NotAMapping { path: PathBuf, found: &'static str },
}

async fn read(path: &Path) -> Result<String, FileError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn into_document(path: &Path, value: Value) -> Result<Document, FileError> {
    match value {
        Value::Object(map) => Ok(map),
        // A YAML document holding only `~` or a comment.
        Value::Null => Ok(Document::new()),
        other => Err(FileError::NotAMapping {
            path: path.to_path_buf(),
            found: kind_of(&other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Loads `.json` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

#[async_trait]
impl ExtensionLoader for JsonLoader {
    async fn load(&self, path: &Path) -> Result<Document, BoxError> {
        let content = read(path).await?;
        let value: Value = serde_json::from_str(&content).map_err(|source| FileError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(into_document(path, value)?)
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Loads `.yaml` and `.yml` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

#[async_trait]
impl ExtensionLoader for YamlLoader {
    async fn load(&self, path: &Path) -> Result<Document, BoxError> {
        let content = read(path).await?;
        if content.trim().is_empty() {
            return Ok(Document::new());
        }
        let value: Value = serde_yaml::from_str(&content).map_err(|source| FileError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(into_document(path, value)?)
    }

    fn name(&self) -> &str {
        "yaml"
    }
}
