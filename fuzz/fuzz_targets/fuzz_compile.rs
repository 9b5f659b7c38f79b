#![no_main]

use jsonschema_guard_core::{compile, CompileOptions};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes → JSON → compile() in both modes, then validate the schema
// against itself as an instance. No input may panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(schema) = serde_json::from_slice::<serde_json::Value>(data) {
        for options in [CompileOptions::default(), CompileOptions::strict()] {
            if let Ok(validator) = compile(&schema, &options) {
                let _ = validator.parse(&schema);
                let _ = validator.to_json_schema();
            }
        }
    }
});
