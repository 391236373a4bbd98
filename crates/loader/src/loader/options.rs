//! Loader defaults and per-call load options.
//!
//! Invariants:
//! - Per-call `data` is deep-merged over the loader's data; every other per-call
//!   field replaces the default when set.
//! - Both records deserialize from camelCase keys (`importsKey`, `flattenOutput`).

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_IMPORTS_KEY;
use crate::document::{Document, deep_merge};
use crate::reference::ResolverOptions;

/// Defaults for every load performed by one `Loader`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderOptions {
    /// Suffix selecting `<stem>_<environment><ext>` sibling files.
    #[serde(alias = "env")]
    pub environment: Option<String>,
    /// Merged into every loaded file with the highest precedence.
    #[serde(alias = "extraData")]
    pub data: Document,
    pub imports_key: String,
    pub resolver_options: ResolverOptions,
    pub flatten_output: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            environment: None,
            data: Document::new(),
            imports_key: DEFAULT_IMPORTS_KEY.to_string(),
            resolver_options: ResolverOptions::default(),
            flatten_output: false,
        }
    }
}

/// Overrides for a single `load` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadOptions {
    #[serde(alias = "env")]
    pub environment: Option<String>,
    #[serde(alias = "extraData")]
    pub data: Option<Document>,
    pub imports_key: Option<String>,
    pub flatten_output: Option<bool>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_data(mut self, data: Document) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_imports_key(mut self, key: impl Into<String>) -> Self {
        self.imports_key = Some(key.into());
        self
    }

    pub fn with_flatten_output(mut self, flatten: bool) -> Self {
        self.flatten_output = Some(flatten);
        self
    }
}

/// Options in force for one top-level load and all of its imports.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EffectiveOptions {
    pub environment: Option<String>,
    pub data: Document,
    pub imports_key: String,
    pub flatten_output: bool,
}

impl LoaderOptions {
    pub(crate) fn effective(&self, overrides: LoadOptions) -> EffectiveOptions {
        let mut data = self.data.clone();
        if let Some(extra) = overrides.data {
            deep_merge(&mut data, extra);
        }
        EffectiveOptions {
            environment: overrides.environment.or_else(|| self.environment.clone()),
            data,
            imports_key: overrides
                .imports_key
                .unwrap_or_else(|| self.imports_key.clone()),
            flatten_output: overrides.flatten_output.unwrap_or(self.flatten_output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_defaults() {
        let options = LoaderOptions::default();
        assert_eq!(options.imports_key, "imports");
        assert!(!options.flatten_output);
        assert!(options.environment.is_none());
        assert!(options.resolver_options.process_env);
    }

    #[test]
    fn test_deserialize_camel_case_and_aliases() {
        let options: LoaderOptions = serde_json::from_value(json!({
            "env": "test",
            "extraData": {"rootDir": "/tmp"},
            "importsKey": "include",
            "flattenOutput": true,
            "resolverOptions": {"globals": {"app": {"name": "x"}}, "processEnv": false}
        }))
        .unwrap();

        assert_eq!(options.environment.as_deref(), Some("test"));
        assert_eq!(options.data["rootDir"], json!("/tmp"));
        assert_eq!(options.imports_key, "include");
        assert!(options.flatten_output);
        assert!(!options.resolver_options.process_env);
        assert_eq!(options.resolver_options.globals["app"], json!({"name": "x"}));
    }

    #[test]
    fn test_effective_merges_data_and_overrides_fields() {
        let defaults = LoaderOptions {
            environment: Some("dev".to_string()),
            data: doc(json!({"a": {"x": 1, "y": 2}})),
            ..LoaderOptions::default()
        };

        let effective = defaults.effective(
            LoadOptions::new()
                .with_data(doc(json!({"a": {"y": 3}, "b": true})))
                .with_imports_key("include")
                .with_flatten_output(true),
        );
        assert_eq!(effective.environment.as_deref(), Some("dev"));
        assert_eq!(
            Value::Object(effective.data),
            json!({"a": {"x": 1, "y": 3}, "b": true})
        );
        assert_eq!(effective.imports_key, "include");
        assert!(effective.flatten_output);

        let effective = defaults.effective(LoadOptions::new().with_environment("prod"));
        assert_eq!(effective.environment.as_deref(), Some("prod"));
        assert_eq!(effective.imports_key, "imports");
    }
}
