//! Record decoding with unknown-field extraction

use ajson_format::{expect_object, Record, Result, UnknownFields};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::DecodeOptions;

/// A decoded record together with the payload keys it did not claim
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// Record populated from the payload
    pub record: T,
    /// Top-level payload keys not matching any declared wire name
    pub unknown: UnknownFields,
}

impl<T> Decoded<T> {
    /// Split into the record and its unknown fields
    pub fn into_parts(self) -> (T, UnknownFields) {
        (self.record, self.unknown)
    }
}

/// Decode `data` into `T` and collect every top-level key `T` does not declare.
///
/// Only fields carrying a tag take part: a payload key matching an untagged
/// field's identifier is still reported as unknown. A tag without a name
/// token is rejected.
pub fn decode<T>(data: &[u8]) -> Result<Decoded<T>>
where
    T: Record + DeserializeOwned,
{
    decode_with(data, &DecodeOptions::default())
}

/// Decode with explicit options
pub fn decode_with<T>(data: &[u8], opts: &DecodeOptions) -> Result<Decoded<T>>
where
    T: Record + DeserializeOwned,
{
    let record: T = serde_json::from_slice(data)?;
    let mut unknown = expect_object(serde_json::from_slice::<Value>(data)?)?;

    let names = declared_wire_names::<T>(opts)?;
    let removed = retain_unknown(&mut unknown, names);
    tracing::debug!(
        claimed = removed,
        unknown = unknown.len(),
        "separated unknown fields from record"
    );

    Ok(Decoded { record, unknown })
}

/// Wire names claimed by `T`, in declaration order.
///
/// Untagged fields are skipped. With `strict_descriptors` a tag lacking a
/// name is an error; otherwise that field is skipped too.
pub fn declared_wire_names<T: Record>(opts: &DecodeOptions) -> Result<Vec<&'static str>> {
    let mut names = Vec::with_capacity(T::fields().len());
    for field in T::fields() {
        match field.wire_name() {
            Ok(Some(name)) => names.push(name),
            Ok(None) => {
                tracing::trace!(field = field.ident, "skipping untagged field");
            }
            Err(err) if !opts.strict_descriptors => {
                tracing::warn!(field = field.ident, error = %err, "skipping field without wire name");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(names)
}

/// Remove each of `wire_names` from `map`, leaving only unclaimed keys.
///
/// Returns the number of keys removed.
pub fn retain_unknown<I, S>(map: &mut Map<String, Value>, wire_names: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    wire_names
        .into_iter()
        .filter(|name| map.remove(name.as_ref()).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ajson_format::{AjsonError, DescriptorError, FieldDescriptor};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Sample {
        name: String,
        age: u32,
        sub: Option<SubSample>,
    }

    impl Record for Sample {
        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::tagged("name", "name"),
                FieldDescriptor::tagged("age", "age"),
                FieldDescriptor::tagged("sub", "sub,omitempty"),
            ];
            FIELDS
        }
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct SubSample {
        name: String,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Untagged {
        name: String,
        age: u32,
    }

    impl Record for Untagged {
        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::untagged("name"),
                FieldDescriptor::tagged("age", "age"),
            ];
            FIELDS
        }
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct NamelessTag {
        name: String,
        sub: Option<SubSample>,
    }

    impl Record for NamelessTag {
        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::tagged("name", "name"),
                FieldDescriptor::tagged("sub", ",omitempty"),
            ];
            FIELDS
        }
    }

    fn john() -> Sample {
        Sample {
            name: "John".to_string(),
            age: 30,
            sub: None,
        }
    }

    fn unknown(value: Value) -> UnknownFields {
        value.as_object().expect("object").clone()
    }

    #[test]
    fn test_decode_without_unknowns() {
        let decoded = decode::<Sample>(br#"{"name":"John","age":30}"#).unwrap();
        assert_eq!(decoded.record, john());
        assert!(decoded.unknown.is_empty());
    }

    #[test]
    fn test_decode_reports_exact_unknowns() {
        let decoded = decode::<Sample>(br#"{"name":"John","age":30,"location":"USA"}"#).unwrap();
        assert_eq!(decoded.record, john());
        assert_eq!(decoded.unknown, unknown(json!({"location": "USA"})));
    }

    #[test]
    fn test_decode_with_sub() {
        let decoded =
            decode::<Sample>(br#"{"name":"John","age":30,"sub":{"name":"Doe"},"location":"USA"}"#)
                .unwrap();
        assert_eq!(
            decoded.record.sub,
            Some(SubSample {
                name: "Doe".to_string()
            })
        );
        assert_eq!(decoded.unknown, unknown(json!({"location": "USA"})));
    }

    #[test]
    fn test_nested_unknowns_are_not_flattened() {
        let data = br#"{"name":"John","age":30,"sub":{"name":"Doe","location":"USA"},"location":"USA"}"#;
        let decoded = decode::<Sample>(data).unwrap();
        assert_eq!(decoded.unknown, unknown(json!({"location": "USA"})));
        assert!(!decoded.unknown.contains_key("sub.location"));
    }

    #[test]
    fn test_unknown_arrays_and_objects_are_kept_whole() {
        let data = br#"{"name":"John","age":30,"emails":["a@example.com"],"meta":{"test":"x"}}"#;
        let decoded = decode::<Sample>(data).unwrap();
        assert_eq!(
            decoded.unknown,
            unknown(json!({"emails": ["a@example.com"], "meta": {"test": "x"}}))
        );
    }

    #[test]
    fn test_absent_declared_fields_stay_default() {
        let decoded = decode::<Sample>(br#"{"name":"John","age":0,"extra":1}"#).unwrap();
        assert_eq!(decoded.record.sub, None);
        assert_eq!(decoded.unknown, unknown(json!({"extra": 1})));
    }

    #[test]
    fn test_untagged_field_key_is_reported_unknown() {
        let decoded = decode::<Untagged>(br#"{"name":"John","age":30}"#).unwrap();
        assert_eq!(decoded.record.name, "John");
        assert_eq!(decoded.unknown, unknown(json!({"name": "John"})));
    }

    #[test]
    fn test_tag_without_name_fails_fast() {
        match decode::<NamelessTag>(br#"{"name":"John"}"#) {
            Err(AjsonError::Descriptor(DescriptorError::MissingWireName { field, .. })) => {
                assert_eq!(field, "sub")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_lenient_descriptors_skip_nameless_tag() {
        let opts = DecodeOptions {
            strict_descriptors: false,
        };
        let decoded =
            decode_with::<NamelessTag>(br#"{"name":"John","sub":{"name":"Doe"}}"#, &opts).unwrap();
        assert_eq!(decoded.unknown, unknown(json!({"sub": {"name": "Doe"}})));
    }

    #[test]
    fn test_malformed_payload_is_codec_error() {
        assert!(matches!(
            decode::<Sample>(br#"{"name":"John","#),
            Err(AjsonError::Json(_))
        ));
    }

    #[test]
    fn test_type_mismatch_is_codec_error() {
        assert!(matches!(
            decode::<Sample>(br#"{"name":"John","age":"thirty"}"#),
            Err(AjsonError::Json(_))
        ));
    }

    #[test]
    fn test_array_payload_is_rejected() {
        match decode::<Sample>(br#"["John",30,null]"#) {
            Err(AjsonError::NotAnObject { found }) => assert_eq!(found, "array"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_retain_unknown_counts_removed_keys() {
        let mut map = unknown(json!({"a": 1, "b": 2, "c": 3}));
        let removed = retain_unknown(&mut map, ["a", "c", "missing"]);
        assert_eq!(removed, 2);
        assert_eq!(map, unknown(json!({"b": 2})));
    }

    #[test]
    fn test_declared_wire_names_order() {
        let names = declared_wire_names::<Sample>(&DecodeOptions::default()).unwrap();
        assert_eq!(names, vec!["name", "age", "sub"]);
        let names = declared_wire_names::<Untagged>(&DecodeOptions::default()).unwrap();
        assert_eq!(names, vec!["age"]);
    }

    #[test]
    fn test_into_parts() {
        let (record, unknown_fields) = decode::<Sample>(br#"{"name":"John","age":30,"x":true}"#)
            .unwrap()
            .into_parts();
        assert_eq!(record, john());
        assert_eq!(unknown_fields.get("x"), Some(&json!(true)));
    }
}
