#![no_main]

use ajson_codec::merge_dotted;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

fuzz_target!(|input: (Vec<String>, u8)| {
    let (key_paths, seed) = input;
    let mut target = Map::new();
    for (i, key_path) in key_paths.iter().enumerate() {
        merge_dotted(&mut target, key_path, Value::from(i as u64 ^ seed as u64), '.');
    }
    let _ = serde_json::to_vec(&target);
});
