//! Document model and deep merge.
//!
//! Responsibilities:
//! - Define `Document`, the ordered key/value mapping produced by every load.
//! - Provide the recursive merge used for environment overrides, imports and
//!   forced data.
//!
//! Invariants:
//! - Key order follows insertion order (`serde_json` is built with `preserve_order`).
//! - `deep_merge` mutates only the target it is handed; sources are consumed,
//!   so concurrently loaded documents never alias each other.
//! - Nested mappings merge key by key. Every other conflict is won by the source,
//!   including sequences, which are replaced wholesale.

use serde_json::{Map, Value};

/// The in-memory result of loading one configuration file.
pub type Document = Map<String, Value>;

/// Merge `source` into `target`, in place. `source` wins on conflicts.
pub fn deep_merge(target: &mut Document, source: Document) {
    for (key, incoming) in source {
        match (target.get_mut(&key), incoming) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                deep_merge(existing, nested);
            }
            (_, incoming) => {
                target.insert(key, incoming);
            }
        }
    }
}

/// Fold `documents` into a fresh document, later entries winning.
pub fn merge_documents<I>(documents: I) -> Document
where
    I: IntoIterator<Item = Document>,
{
    documents
        .into_iter()
        .fold(Document::new(), |mut target, document| {
            deep_merge(&mut target, document);
            target
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_deep_merge_nested_mappings() {
        let mut target = doc(json!({"db": {"host": "localhost", "port": 5432}}));
        deep_merge(&mut target, doc(json!({"db": {"port": 6543, "user": "app"}})));

        assert_eq!(
            Value::Object(target),
            json!({"db": {"host": "localhost", "port": 6543, "user": "app"}})
        );
    }

    #[test]
    fn test_deep_merge_replaces_sequences() {
        let mut target = doc(json!({"hosts": ["a", "b", "c"]}));
        deep_merge(&mut target, doc(json!({"hosts": ["z"]})));
        assert_eq!(target["hosts"], json!(["z"]));
    }

    #[test]
    fn test_deep_merge_type_change_source_wins() {
        let mut target = doc(json!({"a": {"nested": true}, "b": 1}));
        deep_merge(&mut target, doc(json!({"a": "flat", "b": {"now": "nested"}})));
        assert_eq!(Value::Object(target), json!({"a": "flat", "b": {"now": "nested"}}));
    }

    #[test]
    fn test_deep_merge_null_overwrites() {
        let mut target = doc(json!({"a": 1}));
        deep_merge(&mut target, doc(json!({"a": null})));
        assert_eq!(target["a"], Value::Null);
    }

    #[test]
    fn test_merge_documents_later_wins() {
        let merged = merge_documents([
            doc(json!({"x": 1, "keep": "first"})),
            doc(json!({"x": 2})),
            doc(json!({"x": 3, "y": 4})),
        ]);
        assert_eq!(Value::Object(merged), json!({"x": 3, "keep": "first", "y": 4}));
    }

    #[test]
    fn test_merge_preserves_insertion_order() {
        let merged = merge_documents([doc(json!({"b": 1, "a": 2})), doc(json!({"c": 3}))]);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
