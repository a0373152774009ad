//! Error types for AJSON

use thiserror::Error;

/// A field descriptor whose tag cannot be used for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Tag is present but its first option (the wire name) is empty.
    #[error("no wire name in tag {tag:?} for field `{field}`")]
    MissingWireName {
        /// Field identifier as declared on the record type.
        field: &'static str,
        /// Raw tag text.
        tag: &'static str,
    },
}

/// AJSON error types
#[derive(Debug, Error)]
pub enum AjsonError {
    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A record's field descriptor table is malformed.
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),
    /// Top-level value was not a JSON object.
    #[error("Expected a JSON object, found {found}")]
    NotAnObject {
        /// Kind of value that was found instead.
        found: &'static str,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AjsonError>;
