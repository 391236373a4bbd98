//! Default placeholder resolver.
//!
//! Invariants:
//! - Lookups read from a snapshot taken before the pass starts, so the order in
//!   which keys are rewritten never changes the result.
//! - Referenced document values are resolved before they are substituted.
//! - A lookup that re-enters a path already on the lookup stack is a cycle.
//! - Each referenced path is resolved at most once per pass.
//! - `resolve_except` leaves the finalized key untouched; lookups into it
//!   return its value as is.
//! - Global namespaces are consulted before the process environment, so a
//!   global named `env` shadows it.

use serde_json::Value;
use std::collections::HashMap;

use super::error::ReferenceError;
use super::placeholder::{Part, Placeholder, Template, contains_placeholder};
use super::{ReferenceResolver, ResolverOptions};
use crate::constants::PROCESS_ENV_NAMESPACE;
use crate::document::Document;
use crate::path;

/// Resolves `${...}` placeholders against the document, globals and environment.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderResolver {
    options: ResolverOptions,
}

impl PlaceholderResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }
}

impl ReferenceResolver for PlaceholderResolver {
    fn resolve(&self, document: &mut Document, key: Option<&str>) -> Result<(), ReferenceError> {
        match key {
            Some(key) => self.run(document, Scope::Key(key)),
            None => self.run(document, Scope::All),
        }
    }

    fn resolve_except(
        &self,
        document: &mut Document,
        finalized: &str,
    ) -> Result<(), ReferenceError> {
        self.run(document, Scope::AllExcept(finalized))
    }
}

#[derive(Clone, Copy)]
enum Scope<'k> {
    All,
    Key(&'k str),
    AllExcept(&'k str),
}

impl PlaceholderResolver {
    fn run(&self, document: &mut Document, scope: Scope<'_>) -> Result<(), ReferenceError> {
        let snapshot = document.clone();
        let mut pass = Pass {
            options: &self.options,
            root: &snapshot,
            finalized: match scope {
                Scope::AllExcept(key) => Some(key),
                _ => None,
            },
            stack: Vec::new(),
            resolved: HashMap::new(),
        };

        match scope {
            Scope::Key(key) => {
                if let Some(value) = document.get_mut(key) {
                    pass.resolve_in_place(value)?;
                }
            }
            Scope::All | Scope::AllExcept(_) => {
                for (key, value) in document.iter_mut() {
                    if pass.finalized != Some(key.as_str()) {
                        pass.resolve_in_place(value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

struct Pass<'a> {
    options: &'a ResolverOptions,
    root: &'a Document,
    /// Top-level key whose value is final: never rewritten, read as is.
    finalized: Option<&'a str>,
    /// Canonical paths currently being resolved.
    stack: Vec<String>,
    /// Canonical path -> fully resolved value, shared across the pass.
    resolved: HashMap<String, Value>,
}

impl Pass<'_> {
    fn resolve_in_place(&mut self, value: &mut Value) -> Result<(), ReferenceError> {
        match value {
            Value::String(text) if contains_placeholder(text) => {
                *value = self.resolve_string(text)?;
            }
            Value::Array(items) => {
                for item in items {
                    self.resolve_in_place(item)?;
                }
            }
            Value::Object(map) => {
                for item in map.values_mut() {
                    self.resolve_in_place(item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn resolve_string(&mut self, text: &str) -> Result<Value, ReferenceError> {
        let template = Template::parse(text)?;
        if let Some(placeholder) = template.as_single() {
            return self.lookup(placeholder);
        }

        let mut out = String::with_capacity(text.len());
        for part in &template.parts {
            match part {
                Part::Text(literal) => out.push_str(literal),
                Part::Reference(placeholder) => {
                    let value = self.lookup(placeholder)?;
                    out.push_str(&interpolate(placeholder, &value)?);
                }
            }
        }
        Ok(Value::String(out))
    }

    fn lookup(&mut self, placeholder: &Placeholder) -> Result<Value, ReferenceError> {
        let found = match placeholder.namespace.as_deref() {
            None => return self.lookup_document(placeholder),
            Some(namespace) => match self.options.globals.get(namespace) {
                Some(global) => path::get(global, &parse(placeholder)?).cloned(),
                None if namespace == PROCESS_ENV_NAMESPACE && self.options.process_env => {
                    std::env::var(&placeholder.path).ok().map(Value::String)
                }
                None => {
                    return Err(ReferenceError::UnknownNamespace {
                        placeholder: placeholder.raw.clone(),
                        namespace: namespace.to_string(),
                    });
                }
            },
        };
        found.or_else(|| fallback(placeholder)).ok_or_else(|| ReferenceError::NotFound {
            placeholder: placeholder.raw.clone(),
        })
    }

    fn lookup_document(&mut self, placeholder: &Placeholder) -> Result<Value, ReferenceError> {
        let segments = parse(placeholder)?;
        let root = self.root;
        let Some(target) = path::get_in(root, &segments) else {
            return fallback(placeholder).ok_or_else(|| ReferenceError::NotFound {
                placeholder: placeholder.raw.clone(),
            });
        };

        if let (Some(finalized), Some(path::Segment::Key(first))) =
            (self.finalized, segments.first())
            && first == finalized
        {
            return Ok(target.clone());
        }

        let canonical = path::format_path(&segments);
        if let Some(value) = self.resolved.get(&canonical) {
            return Ok(value.clone());
        }
        if self.stack.contains(&canonical) {
            let mut chain = self.stack.clone();
            chain.push(canonical);
            return Err(ReferenceError::Cycle { chain });
        }

        let mut value = target.clone();
        self.stack.push(canonical);
        let result = self.resolve_in_place(&mut value);
        let canonical = self.stack.pop().unwrap_or_default();
        result?;
        self.resolved.insert(canonical, value.clone());
        Ok(value)
    }
}

fn parse(placeholder: &Placeholder) -> Result<Vec<path::Segment>, ReferenceError> {
    path::parse_path(&placeholder.path).map_err(|e| ReferenceError::Malformed {
        placeholder: placeholder.raw.clone(),
        message: e.message,
    })
}

fn fallback(placeholder: &Placeholder) -> Option<Value> {
    placeholder.fallback.clone().map(Value::String)
}

fn interpolate(placeholder: &Placeholder, value: &Value) -> Result<String, ReferenceError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) => Err(ReferenceError::NotInterpolatable {
            placeholder: placeholder.raw.clone(),
            kind: "a sequence",
        }),
        Value::Object(_) => Err(ReferenceError::NotInterpolatable {
            placeholder: placeholder.raw.clone(),
            kind: "a mapping",
        }),
    }
}
