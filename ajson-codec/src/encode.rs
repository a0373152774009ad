//! Record encoding with extra fields merged in

use std::io::Write;

use ajson_format::{expect_object, is_empty_value, Extras, FieldDescriptor, Record, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::path::merge_all;
use crate::EncodeOptions;

/// Encode `record` and merge `extras` into the resulting JSON object.
///
/// Extras are applied in ascending key order, so `"a"` is written before
/// `"a.b"`. An extra sharing a top-level key with a record field wins.
pub fn encode<R>(record: &R, extras: &Extras) -> Result<Vec<u8>>
where
    R: Record + Serialize,
{
    encode_with(record, extras, &EncodeOptions::default())
}

/// Encode with explicit options
pub fn encode_with<R>(record: &R, extras: &Extras, opts: &EncodeOptions) -> Result<Vec<u8>>
where
    R: Record + Serialize,
{
    let merged = encode_to_map(record, extras, opts)?;
    let bytes = if opts.pretty {
        serde_json::to_vec_pretty(&merged)?
    } else {
        serde_json::to_vec(&merged)?
    };
    Ok(bytes)
}

/// Encode straight into a writer
pub fn encode_to_writer<R, W>(
    writer: W,
    record: &R,
    extras: &Extras,
    opts: &EncodeOptions,
) -> Result<()>
where
    R: Record + Serialize,
    W: Write,
{
    let merged = encode_to_map(record, extras, opts)?;
    if opts.pretty {
        serde_json::to_writer_pretty(writer, &merged)?;
    } else {
        serde_json::to_writer(writer, &merged)?;
    }
    Ok(())
}

/// Build the merged object without serializing it
pub fn encode_to_map<R>(record: &R, extras: &Extras, opts: &EncodeOptions) -> Result<Map<String, Value>>
where
    R: Record + Serialize,
{
    let mut merged = record_to_map(record, opts)?;
    let applied = merge_all(&mut merged, extras, opts.path_separator);
    tracing::debug!(
        fields = merged.len(),
        extras = applied,
        "merged extra fields into record"
    );
    Ok(merged)
}

/// Serialize `record` into its base object.
///
/// Serde decides which fields are written, so the result always decodes back
/// into `R`. Fields tagged `omitempty` that still serialized an empty value are
/// reported, and removed only when `strip_empty` is set.
pub fn record_to_map<R>(record: &R, opts: &EncodeOptions) -> Result<Map<String, Value>>
where
    R: Record + Serialize,
{
    let mut base = expect_object(serde_json::to_value(record)?)?;
    check_omit_empty(&mut base, R::fields(), opts.strip_empty);
    Ok(base)
}

fn check_omit_empty(map: &mut Map<String, Value>, fields: &[FieldDescriptor], strip: bool) {
    for field in fields {
        let key = field.encoded_name();

        if field.omit_empty() && map.get(key).is_some_and(is_empty_value) {
            if strip {
                map.remove(key);
            } else {
                tracing::debug!(
                    field = field.ident,
                    key,
                    "omitempty field serialized an empty value"
                );
            }
            continue;
        }

        if let (Some(nested), Some(Value::Object(child))) = (field.nested, map.get_mut(key)) {
            check_omit_empty(child, nested(), strip);
        }
    }
}
