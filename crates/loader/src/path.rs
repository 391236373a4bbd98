//! Dot/bracket path addressing into documents.
//!
//! Responsibilities:
//! - Parse paths such as `server.port`, `hosts[0].name` or `a["key.with.dots"]`.
//! - Read, write and remove values at a parsed path.
//! - Render segments back into a canonical path string.
//!
//! Does NOT handle:
//! - Placeholder syntax (see `reference/placeholder.rs`).
//!
//! Invariants:
//! - Quoted keys accept `\` escapes; `format_path` output always parses back
//!   to the same segments.
//! - Indices are zero-based; `set` may append at exactly `len`, never beyond.
//! - `set` creates missing intermediate mappings but never replaces a scalar
//!   that stands in the way.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::document::Document;

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A path that could not be parsed or applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid path '{path}': {message}")]
pub struct PathError {
    pub path: String,
    pub message: String,
}

impl PathError {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Dot,
    Key,
    Bracket,
}

/// Parse a dot/bracket path into segments.
pub fn parse_path(path: &str) -> Result<Vec<Segment>, PathError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut state = State::Start;
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                match state {
                    State::Key => segments.push(Segment::Key(std::mem::take(&mut current))),
                    State::Bracket => {}
                    State::Start | State::Dot => {
                        return Err(PathError::new(path, "empty segment"));
                    }
                }
                state = State::Dot;
            }
            '[' => {
                match state {
                    State::Key => segments.push(Segment::Key(std::mem::take(&mut current))),
                    State::Dot => return Err(PathError::new(path, "empty segment before '['")),
                    State::Start | State::Bracket => {}
                }
                segments.push(parse_bracket(&mut chars, path)?);
                state = State::Bracket;
            }
            ']' => return Err(PathError::new(path, "unexpected ']'")),
            _ => {
                if state == State::Bracket {
                    return Err(PathError::new(path, "expected '.' or '[' after ']'"));
                }
                current.push(c);
                state = State::Key;
            }
        }
    }

    match state {
        State::Key => segments.push(Segment::Key(current)),
        State::Bracket => {}
        State::Start => return Err(PathError::new(path, "path is empty")),
        State::Dot => return Err(PathError::new(path, "trailing '.'")),
    }
    Ok(segments)
}

fn parse_bracket<I>(chars: &mut std::iter::Peekable<I>, path: &str) -> Result<Segment, PathError>
where
    I: Iterator<Item = char>,
{
    if let Some(&quote) = chars.peek()
        && (quote == '"' || quote == '\'')
    {
        chars.next();
        let mut key = String::new();
        loop {
            match chars.next() {
                Some(c) if c == quote => break,
                Some('\\') => match chars.next() {
                    Some(escaped) => key.push(escaped),
                    None => return Err(PathError::new(path, "unterminated quoted key")),
                },
                Some(c) => key.push(c),
                None => return Err(PathError::new(path, "unterminated quoted key")),
            }
        }
        return match chars.next() {
            Some(']') => Ok(Segment::Key(key)),
            _ => Err(PathError::new(path, "expected ']' after quoted key")),
        };
    }

    let mut digits = String::new();
    loop {
        match chars.next() {
            Some(']') => break,
            Some(c) => digits.push(c),
            None => return Err(PathError::new(path, "unterminated '['")),
        }
    }
    digits
        .trim()
        .parse::<usize>()
        .map(Segment::Index)
        .map_err(|_| PathError::new(path, format!("'{digits}' is not an index")))
}

/// Render segments as a canonical path string.
pub fn format_path(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Index(index) => out.push_str(&format!("[{index}]")),
            Segment::Key(key) if needs_quoting(key) => {
                out.push_str("[\"");
                for c in key.chars() {
                    if c == '"' || c == '\\' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push_str("\"]");
            }
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
        }
    }
    out
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']'])
}

/// Look up the value at `segments` below `root`.
pub fn get<'a>(root: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |current, segment| match (current, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get(key),
            (Value::Array(items), Segment::Index(index)) => items.get(*index),
            // Numeric keys on mappings and string indices on sequences are both
            // common in hand-written paths.
            (Value::Object(map), Segment::Index(index)) => map.get(&index.to_string()),
            (Value::Array(items), Segment::Key(key)) => {
                key.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            _ => None,
        })
}

/// Write `value` at `segments` below `root`, creating intermediate mappings.
pub fn set(root: &mut Value, segments: &[Segment], value: Value) -> Result<(), PathError> {
    let Some((last, parents)) = segments.split_last() else {
        *root = value;
        return Ok(());
    };

    let mut current = root;
    for segment in parents {
        current = match (current, segment) {
            (Value::Object(map), Segment::Key(key)) => map
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new())),
            (Value::Array(items), Segment::Index(index)) if *index < items.len() => {
                &mut items[*index]
            }
            _ => {
                return Err(PathError::new(
                    &format_path(segments),
                    format!("cannot descend into '{}'", format_path(&[segment.clone()])),
                ));
            }
        };
    }

    match (current, last) {
        (Value::Object(map), Segment::Key(key)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (Value::Array(items), Segment::Index(index)) if *index < items.len() => {
            items[*index] = value;
            Ok(())
        }
        (Value::Array(items), Segment::Index(index)) if *index == items.len() => {
            items.push(value);
            Ok(())
        }
        _ => Err(PathError::new(
            &format_path(segments),
            "target is not a container for this segment",
        )),
    }
}

/// Remove and return the value at `segments` below `root`.
pub fn remove(root: &mut Value, segments: &[Segment]) -> Option<Value> {
    let (last, parents) = segments.split_last()?;
    let mut current = root;
    for segment in parents {
        current = match (current, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get_mut(key)?,
            (Value::Array(items), Segment::Index(index)) => items.get_mut(*index)?,
            _ => return None,
        };
    }
    match (current, last) {
        (Value::Object(map), Segment::Key(key)) => map.shift_remove(key),
        (Value::Array(items), Segment::Index(index)) if *index < items.len() => {
            Some(items.remove(*index))
        }
        _ => None,
    }
}

fn document_key(segment: &Segment) -> String {
    match segment {
        Segment::Key(key) => key.clone(),
        Segment::Index(index) => index.to_string(),
    }
}

/// Look up the value at `segments` inside `document`.
pub fn get_in<'a>(document: &'a Document, segments: &[Segment]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    get(document.get(&document_key(first))?, rest)
}

/// Write `value` at `segments` inside `document`.
pub fn set_in(document: &mut Document, segments: &[Segment], value: Value) -> Result<(), PathError> {
    let Some((first, rest)) = segments.split_first() else {
        return Err(PathError::new("", "cannot replace the document root"));
    };
    let key = document_key(first);
    if rest.is_empty() {
        document.insert(key, value);
        return Ok(());
    }
    let child = document
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    set(child, rest, value).map_err(|e| PathError::new(&format_path(segments), e.message))
}

/// Remove and return the value at `segments` inside `document`.
pub fn remove_in(document: &mut Document, segments: &[Segment]) -> Option<Value> {
    let (first, rest) = segments.split_first()?;
    let key = document_key(first);
    if rest.is_empty() {
        return document.shift_remove(&key);
    }
    remove(document.get_mut(&key)?, rest)
}
