//! AJSON Format - Core primitives for typed JSON records with extra fields
//!
//! This crate provides the building blocks shared by the AJSON codec:
//!
//! - Field descriptor tables and tag parsing
//! - JSON value kinds and the `omitempty` emptiness rule
//! - Error types

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod types;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

// Re-export commonly used types
pub use descriptor::{FieldDescriptor, FieldTag, FieldsFn, Record, OMIT_EMPTY};
pub use error::{AjsonError, DescriptorError, Result};
pub use types::{is_empty_value, ValueKind};

/// Extra fields to inject on encode, keyed by dotted key-path
pub type Extras = BTreeMap<String, Value>;

/// Top-level payload fields not claimed by a record
pub type UnknownFields = Map<String, Value>;

/// Default separator between key-path segments
pub const DEFAULT_PATH_SEPARATOR: char = '.';

/// Require a top-level JSON object, reporting the kind found otherwise
pub fn expect_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(AjsonError::NotAnObject {
            found: ValueKind::of(&other).name(),
        }),
    }
}
