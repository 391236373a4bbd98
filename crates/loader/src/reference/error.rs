//! Error types for reference resolution.

use thiserror::Error;

/// A placeholder that could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Malformed reference '{placeholder}': {message}")]
    Malformed {
        placeholder: String,
        message: String,
    },

    #[error("Unresolved reference '{placeholder}'")]
    NotFound { placeholder: String },

    #[error("Unknown namespace '{namespace}' in reference '{placeholder}'")]
    UnknownNamespace {
        placeholder: String,
        namespace: String,
    },

    #[error("Reference '{placeholder}' points to {kind} and cannot be embedded in a string")]
    NotInterpolatable {
        placeholder: String,
        kind: &'static str,
    },

    #[error("Reference cycle: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}
