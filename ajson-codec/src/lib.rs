//! AJSON Codec - Typed records that keep their unknown fields
//!
//! This crate reconciles a typed record with an open set of extra fields:
//!
//! - [`encode`] serializes a record and injects extra fields at dotted
//!   key-paths (`"sub.location"`), extras taking precedence
//! - [`decode`] populates a record and returns every top-level payload key
//!   the record does not declare
//! - [`path`] holds the key-path merge used by the encoder
//!
//! ```
//! use ajson_codec::{decode, encode, Extras, FieldDescriptor, Record};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Sample {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Record for Sample {
//!     fn fields() -> &'static [FieldDescriptor] {
//!         const FIELDS: &[FieldDescriptor] = &[
//!             FieldDescriptor::tagged("name", "name"),
//!             FieldDescriptor::tagged("age", "age"),
//!         ];
//!         FIELDS
//!     }
//! }
//!
//! let sample = Sample { name: "John".into(), age: 30 };
//! let mut extras = Extras::new();
//! extras.insert("location".into(), json!("USA"));
//!
//! let data = encode(&sample, &extras).unwrap();
//! let decoded = decode::<Sample>(&data).unwrap();
//! assert_eq!(decoded.record, sample);
//! assert_eq!(decoded.unknown.get("location"), Some(&json!("USA")));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod decode;
pub mod encode;
pub mod path;

// Re-export commonly used types
pub use ajson_format::{
    AjsonError, DescriptorError, Extras, FieldDescriptor, FieldTag, Record, Result,
    UnknownFields, DEFAULT_PATH_SEPARATOR,
};

// Re-export our own types
pub use decode::{declared_wire_names, decode, decode_with, retain_unknown, Decoded};
pub use encode::{encode, encode_to_map, encode_to_writer, encode_with, record_to_map};
pub use path::{merge_all, merge_dotted, merge_path};

/// Encoding options
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Separator between key-path segments in extras keys
    pub path_separator: char,
    /// Pretty-print the output
    pub pretty: bool,
    /// Drop empty values that serde kept for fields tagged `omitempty`.
    ///
    /// Off by default: a stripped key only decodes back when the field is an
    /// `Option` or carries `#[serde(default)]`.
    pub strip_empty: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_PATH_SEPARATOR,
            pretty: false,
            strip_empty: false,
        }
    }
}

/// Decoding options
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Reject tags that have no wire name instead of skipping the field
    pub strict_descriptors: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_descriptors: true,
        }
    }
}
