#![no_main]

use ajson_codec::{decode, encode_to_map, EncodeOptions, FieldDescriptor, Record};
use libfuzzer_sys::fuzz_target;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Sample {
    name: String,
    age: u32,
}

impl Record for Sample {
    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::tagged("name", "name"),
            FieldDescriptor::tagged("age", "age"),
        ];
        FIELDS
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(decoded) = decode::<Sample>(data) {
        assert!(!decoded.unknown.contains_key("name"));
        assert!(!decoded.unknown.contains_key("age"));

        let extras = decoded.unknown.into_iter().collect();
        let _ = encode_to_map(&decoded.record, &extras, &EncodeOptions::default());
    }
});
