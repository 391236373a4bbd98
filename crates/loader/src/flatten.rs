//! Flattened, path-addressable view over a loaded document.
//!
//! Responsibilities:
//! - Wrap a final document so values can be read and written by path.
//! - Enumerate every leaf under its canonical path.
//! - Define `LoadOutput`, the nested-or-flattened result of a load.
//!
//! Invariants:
//! - Empty mappings and empty sequences are reported as leaves.
//! - `leaves()` yields paths that `get()` accepts.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::Document;
use crate::path::{self, PathError, Segment};

/// A document addressed by `a.b[0].c` style paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatDocument {
    document: Document,
}

impl FlatDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Value at `path`, or `None` when absent or the path is malformed.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments = path::parse_path(path).ok()?;
        path::get_in(&self.document, &segments)
    }

    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Write `value` at `path`, creating intermediate mappings as needed.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), PathError> {
        let segments = path::parse_path(path)?;
        path::set_in(&mut self.document, &segments, value)
    }

    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let segments = path::parse_path(path).ok()?;
        path::remove_in(&mut self.document, &segments)
    }

    /// Every leaf value keyed by its canonical path, in document order.
    pub fn leaves(&self) -> Map<String, Value> {
        let mut out = Map::new();
        let mut prefix = Vec::new();
        for (key, value) in &self.document {
            prefix.push(Segment::Key(key.clone()));
            collect_leaves(value, &mut prefix, &mut out);
            prefix.pop();
        }
        out
    }

    pub fn as_document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

fn collect_leaves(value: &Value, prefix: &mut Vec<Segment>, out: &mut Map<String, Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                prefix.push(Segment::Key(key.clone()));
                collect_leaves(child, prefix, out);
                prefix.pop();
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                prefix.push(Segment::Index(index));
                collect_leaves(child, prefix, out);
                prefix.pop();
            }
        }
        leaf => {
            out.insert(path::format_path(prefix), leaf.clone());
        }
    }
}

/// The result of a load: a nested document, or a flattened view of one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoadOutput {
    Document(Document),
    Flattened(FlatDocument),
}

impl LoadOutput {
    /// Value at `path` regardless of output shape.
    pub fn get(&self, path: &str) -> Option<&Value> {
        match self {
            LoadOutput::Document(document) => {
                let segments = path::parse_path(path).ok()?;
                path::get_in(document, &segments)
            }
            LoadOutput::Flattened(flat) => flat.get(path),
        }
    }

    pub fn is_flattened(&self) -> bool {
        matches!(self, LoadOutput::Flattened(_))
    }

    pub fn as_document(&self) -> &Document {
        match self {
            LoadOutput::Document(document) => document,
            LoadOutput::Flattened(flat) => flat.as_document(),
        }
    }

    pub fn into_document(self) -> Document {
        match self {
            LoadOutput::Document(document) => document,
            LoadOutput::Flattened(flat) => flat.into_document(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(value: Value) -> FlatDocument {
        match value {
            Value::Object(map) => FlatDocument::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_get_nested_path() {
        let view = flat(json!({"a": {"b": 1}, "list": [{"name": "x"}]}));
        assert_eq!(view.get("a.b"), Some(&json!(1)));
        assert_eq!(view.get("a"), Some(&json!({"b": 1})));
        assert_eq!(view.get("list[0].name"), Some(&json!("x")));
        assert!(!view.has("a.c"));
        assert!(!view.has("a..b"));
    }

    #[test]
    fn test_leaves_uses_canonical_paths() {
        let view = flat(json!({
            "a": {"b": 1, "empty": {}},
            "list": [true, []],
            "dotted.key": "v"
        }));
        let leaves = view.leaves();
        let keys: Vec<&str> = leaves.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["a.b", "a.empty", "list[0]", "list[1]", "[\"dotted.key\"]"]
        );
        for key in keys {
            assert!(view.has(key), "leaf path {key} should resolve");
        }
    }

    #[test]
    fn test_leaves_with_quotes_in_keys_resolve() {
        let view = flat(json!({"a\"b.c": 1, "plain\"quote": 2}));
        let leaves = view.leaves();
        let keys: Vec<&str> = leaves.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![r#"["a\"b.c"]"#, "plain\"quote"]);
        assert_eq!(view.get(keys[0]), Some(&json!(1)));
        assert!(view.has(keys[1]));
    }

    #[test]
    fn test_set_and_remove() {
        let mut view = flat(json!({"a": {"b": 1}}));
        view.set("a.c.d", json!("x")).unwrap();
        assert_eq!(view.get("a.c.d"), Some(&json!("x")));
        assert_eq!(view.remove("a.b"), Some(json!(1)));
        assert_eq!(view.into_document().get("a"), Some(&json!({"c": {"d": "x"}})));
    }

    #[test]
    fn test_load_output_get_on_both_shapes() {
        let nested = LoadOutput::Document(flat(json!({"a": {"b": 1}})).into_document());
        let flattened = LoadOutput::Flattened(flat(json!({"a": {"b": 1}})));
        assert_eq!(nested.get("a.b"), Some(&json!(1)));
        assert_eq!(flattened.get("a.b"), Some(&json!(1)));
        assert!(flattened.is_flattened());
        assert!(!nested.is_flattened());
    }
}
