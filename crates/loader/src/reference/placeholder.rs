//! Parsing of `${...}` placeholders inside string values.

use super::error::ReferenceError;

/// One `${...}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Full text including `${` and `}`.
    pub raw: String,
    pub namespace: Option<String>,
    pub path: String,
    pub fallback: Option<String>,
}

impl Placeholder {
    fn parse(raw: &str, body: &str) -> Result<Self, ReferenceError> {
        let (reference, fallback) = match body.split_once(":-") {
            Some((reference, fallback)) => (reference, Some(fallback.to_string())),
            None => (body, None),
        };

        let (namespace, path) = match reference.split_once(':') {
            Some((ns, path)) if is_identifier(ns) => (Some(ns.to_string()), path),
            _ => (None, reference),
        };

        let path = path.trim();
        if path.is_empty() {
            return Err(ReferenceError::Malformed {
                placeholder: raw.to_string(),
                message: "empty reference".to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            namespace,
            path: path.to_string(),
            fallback,
        })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A piece of a parsed string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Reference(Placeholder),
}

/// A string value split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub parts: Vec<Part>,
}

impl Template {
    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        let mut parts = Vec::new();
        let mut rest = input;

        while let Some(start) = rest.find("${") {
            if start > 0 {
                parts.push(Part::Text(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                return Err(ReferenceError::Malformed {
                    placeholder: rest[start..].to_string(),
                    message: "missing closing '}'".to_string(),
                });
            };
            let raw = &rest[start..start + 2 + end + 1];
            parts.push(Part::Reference(Placeholder::parse(raw, &after[..end])?));
            rest = &after[end + 1..];
        }
        if !rest.is_empty() {
            parts.push(Part::Text(rest.to_string()));
        }
        Ok(Self { parts })
    }

    /// The placeholder, if the template is exactly one placeholder and nothing else.
    pub fn as_single(&self) -> Option<&Placeholder> {
        match self.parts.as_slice() {
            [Part::Reference(placeholder)] => Some(placeholder),
            _ => None,
        }
    }

    pub fn has_references(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, Part::Reference(_)))
    }
}

/// Cheap pre-check before parsing.
pub fn contains_placeholder(input: &str) -> bool {
    input.contains("${")
}
