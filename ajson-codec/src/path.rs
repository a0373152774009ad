//! Dotted key-path merging into nested JSON objects

use serde_json::{Map, Value};

/// Set `value` at `path` inside `target`, creating intermediate objects.
///
/// A single-segment path replaces whatever was stored under that key. Longer
/// paths descend into an existing object under the first segment, keeping its
/// other keys; any non-object value in the way is replaced by a fresh object.
/// An empty path leaves `target` untouched.
pub fn merge_path<S: AsRef<str>>(target: &mut Map<String, Value>, path: &[S], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    let head = head.as_ref();

    if rest.is_empty() {
        target.insert(head.to_string(), value);
        return;
    }

    match target.get_mut(head) {
        Some(Value::Object(child)) => merge_path(child, rest, value),
        _ => {
            let mut child = Map::new();
            merge_path(&mut child, rest, value);
            target.insert(head.to_string(), Value::Object(child));
        }
    }
}

/// Split `key_path` on `separator` and merge `value` at the resulting path.
///
/// Empty segments are kept, so `"a..b"` writes under an empty-string key.
pub fn merge_dotted(target: &mut Map<String, Value>, key_path: &str, value: Value, separator: char) {
    let segments: Vec<&str> = key_path.split(separator).collect();
    merge_path(target, segments.as_slice(), value);
}

/// Merge every `(key_path, value)` pair into `target` in iteration order.
///
/// Returns the number of pairs applied.
pub fn merge_all<'a, I>(target: &mut Map<String, Value>, extras: I, separator: char) -> usize
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut applied = 0;
    for (key_path, value) in extras {
        tracing::trace!(key_path = %key_path, "merging extra field");
        merge_dotted(target, key_path, value.clone(), separator);
        applied += 1;
    }
    applied
}
