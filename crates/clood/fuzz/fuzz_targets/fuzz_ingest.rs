//! Fuzz target for case ingestion.
//!
//! The ingestor must never panic, and a successful batch always has one key
//! per attribute in every case.

#![no_main]

use libfuzzer_sys::fuzz_target;

use clood::{Attribute, AttributeType, CaseIngestor, Similarity};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let attributes = vec![
        Attribute::new("a", AttributeType::String, Similarity::Equal),
        Attribute::new("b", AttributeType::Integer, Similarity::Array),
        Attribute::new("c", AttributeType::Object, Similarity::None),
    ];

    if let Ok(batch) = CaseIngestor::new(&attributes).ingest_str(text) {
        for case in &batch.data {
            assert_eq!(case.len(), attributes.len());
        }
    }
});
