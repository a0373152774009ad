//! Field descriptor tables for typed records
//!
//! A record type lists its declared fields once, in declaration order, as a
//! static table of [`FieldDescriptor`]s. Each descriptor carries the field's
//! identifier and an optional tag of the form `"wire_name,opt1,opt2"`. The
//! encoder reads the tags to check `omitempty`; the decoder reads them to
//! decide which payload keys the record claims.
//!
//! ```
//! use ajson_format::{FieldDescriptor, Record};
//!
//! struct Sample;
//!
//! impl Record for Sample {
//!     fn fields() -> &'static [FieldDescriptor] {
//!         const FIELDS: &[FieldDescriptor] = &[
//!             FieldDescriptor::tagged("name", "name"),
//!             FieldDescriptor::tagged("nickname", "nick,omitempty"),
//!             FieldDescriptor::untagged("cache"),
//!         ];
//!         FIELDS
//!     }
//! }
//!
//! assert_eq!(Sample::fields().len(), 3);
//! ```

use crate::error::DescriptorError;

/// Tag option marking a field whose empty value should not be written.
pub const OMIT_EMPTY: &str = "omitempty";

/// Function returning the descriptor table of a nested record type.
pub type FieldsFn = fn() -> &'static [FieldDescriptor];

/// Type with a static table of declared fields
pub trait Record {
    /// Declared fields in declaration order
    fn fields() -> &'static [FieldDescriptor];
}

/// One declared field of a record type
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field identifier as written on the Rust type
    pub ident: &'static str,
    /// Raw tag, `None` for unannotated fields
    pub tag: Option<&'static str>,
    /// Descriptor table of the field's type when it is itself a record
    pub nested: Option<FieldsFn>,
}

impl FieldDescriptor {
    /// Descriptor for a field carrying a tag
    pub const fn tagged(ident: &'static str, tag: &'static str) -> Self {
        Self {
            ident,
            tag: Some(tag),
            nested: None,
        }
    }

    /// Descriptor for a field without a tag
    pub const fn untagged(ident: &'static str) -> Self {
        Self {
            ident,
            tag: None,
            nested: None,
        }
    }

    /// Mark this field as holding another record with its own table
    pub const fn with_nested(self, fields: FieldsFn) -> Self {
        Self {
            ident: self.ident,
            tag: self.tag,
            nested: Some(fields),
        }
    }

    /// Parsed tag, `None` when the field is unannotated.
    ///
    /// An empty tag string counts as no tag.
    pub fn parse_tag(&self) -> Option<FieldTag> {
        self.tag.filter(|raw| !raw.is_empty()).map(FieldTag::parse)
    }

    /// Wire name claimed by this field.
    ///
    /// Returns `Ok(None)` for unannotated fields and an error when the tag is
    /// present but has no name token.
    pub fn wire_name(&self) -> Result<Option<&'static str>, DescriptorError> {
        let Some(tag) = self.parse_tag() else {
            return Ok(None);
        };
        if tag.name.is_empty() {
            return Err(DescriptorError::MissingWireName {
                field: self.ident,
                tag: tag.raw,
            });
        }
        Ok(Some(tag.name))
    }

    /// Key the field is serialized under: the tag name, or the identifier
    /// when the tag has no name.
    pub fn encoded_name(&self) -> &'static str {
        match self.parse_tag() {
            Some(tag) if !tag.name.is_empty() => tag.name,
            _ => self.ident,
        }
    }

    /// Whether the tag carries `omitempty`
    pub fn omit_empty(&self) -> bool {
        self.parse_tag()
            .map(|tag| tag.has_option(OMIT_EMPTY))
            .unwrap_or(false)
    }
}

/// A parsed field tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTag {
    /// First comma-separated token; may be empty
    pub name: &'static str,
    raw: &'static str,
}

impl FieldTag {
    /// Split a raw tag into its name and options
    pub fn parse(raw: &'static str) -> Self {
        let name = raw.split(',').next().unwrap_or("");
        Self { name, raw }
    }

    /// Raw tag text
    pub fn raw(&self) -> &'static str {
        self.raw
    }

    /// Options following the name, in order
    pub fn options(&self) -> impl Iterator<Item = &'static str> {
        self.raw.split(',').skip(1).filter(|opt| !opt.is_empty())
    }

    /// Whether the given option is present
    pub fn has_option(&self, option: &str) -> bool {
        self.options().any(|opt| opt == option)
    }
}
