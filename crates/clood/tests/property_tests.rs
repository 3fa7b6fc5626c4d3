//! Property-based tests for the schema editor, the ingestion parser and the
//! table editor.
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p clood --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::{json, Value};

use clood::input::split_fields;
use clood::query::split_array_value;
use clood::schema::TableOptions;
use clood::{
    Attribute, AttributeType, CaseIngestor, Project, SchemaEditor, SchemaError, Similarity,
    TableEditor,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn attribute_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// Distinct attribute names, in a fixed order.
fn attribute_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(attribute_name(), 1..8).prop_map(|set| set.into_iter().collect())
}

/// Field text that never contains an unguarded comma.
fn field_literal() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        "[a-zA-Z ,\\[\\]{}]{0,12}".prop_map(|s| json!(s)),
        prop::collection::vec(any::<i16>(), 0..4).prop_map(|v| json!(v)),
        Just(json!({"k": [1, 2], "j": "a,b"})),
    ]
}

// =============================================================================
// Schema editor
// =============================================================================

proptest! {
    #[test]
    fn add_twice_keeps_one(name in attribute_name(), others in attribute_names()) {
        prop_assume!(!others.contains(&name));
        let mut editor = SchemaEditor::new(Project::new("p"));
        for other in &others {
            editor
                .add_attribute(&Attribute::new(other.clone(), AttributeType::String, Similarity::Equal))
                .unwrap();
        }
        let candidate = Attribute::new(name.clone(), AttributeType::Integer, Similarity::Equal);
        editor.add_attribute(&candidate).unwrap();
        let second = editor.add_attribute(&candidate);

        prop_assert_eq!(second, Err(SchemaError::DuplicateName(name.clone())));
        let count = editor.project().attributes.iter().filter(|a| a.name == name).count();
        prop_assert_eq!(count, 1);
    }
}

// =============================================================================
// Ingestion
// =============================================================================

proptest! {
    #[test]
    fn splitter_never_panics(line in ".{0,200}") {
        let fields = split_fields(&line);
        prop_assert!(!fields.is_empty());
    }

    #[test]
    fn split_then_join_restores_line(line in "[a-z0-9,\\[\\]{}\"]{0,60}") {
        let fields = split_fields(&line);
        prop_assert_eq!(fields.join(","), line);
    }

    #[test]
    fn ingest_round_trip(
        names in attribute_names(),
        rows in prop::collection::vec(prop::collection::vec(field_literal(), 8), 0..20),
    ) {
        let attributes: Vec<Attribute> = names
            .iter()
            .map(|n| Attribute::new(n.clone(), AttributeType::Object, Similarity::None))
            .collect();

        let mut text = names.join(",");
        for row in &rows {
            text.push('\n');
            let cells: Vec<String> = row[..names.len()].iter().map(|v| v.to_string()).collect();
            text.push_str(&cells.join(","));
        }

        let batch = CaseIngestor::new(&attributes).ingest_str(&text).unwrap();
        prop_assert_eq!(batch.len(), rows.len());
        for (case, row) in batch.data.iter().zip(&rows) {
            prop_assert_eq!(case.len(), names.len());
            for (name, value) in names.iter().zip(row) {
                prop_assert_eq!(&case[name], value);
            }
        }
    }

    #[test]
    fn column_count_mismatch_never_ingests(names in attribute_names(), extra in attribute_name()) {
        prop_assume!(!names.contains(&extra));
        let attributes: Vec<Attribute> = names
            .iter()
            .chain(std::iter::once(&extra))
            .map(|n| Attribute::new(n.clone(), AttributeType::String, Similarity::Equal))
            .collect();

        let text = format!("{}\n", names.join(","));
        prop_assert!(CaseIngestor::new(&attributes).ingest_str(&text).is_err());
    }
}

// =============================================================================
// Query assembly
// =============================================================================

proptest! {
    #[test]
    fn integer_arrays_parse(values in prop::collection::vec(any::<i64>(), 1..10)) {
        let text = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
        let out = split_array_value("a", &json!(text), Similarity::Array, AttributeType::Integer).unwrap();
        prop_assert_eq!(out, json!(values));
    }
}

// =============================================================================
// Table editor
// =============================================================================

proptest! {
    #[test]
    fn symmetric_table_saves_symmetric(
        names in attribute_names(),
        scores in prop::collection::vec(0.0f64..=1.0, 64),
    ) {
        let mut editor = TableEditor::new(&TableOptions::default());
        for name in &names {
            editor.add_value(name.clone()).unwrap();
        }
        // Write the lower triangle, then switch symmetry on
        for (i, a) in names.iter().enumerate() {
            for (j, b) in names.iter().enumerate().take(i) {
                editor.set_cell(a, b, scores[i * 8 + j]).unwrap();
            }
        }
        editor.set_symmetric(true);

        let options = editor.to_options().unwrap();
        for (i, a) in names.iter().enumerate() {
            prop_assert!(editor.is_cell_disabled(i, i));
            for b in &names {
                prop_assert_eq!(options.score(a, b), options.score(b, a));
            }
        }
    }

    #[test]
    fn update_grid_never_overwrites(names in attribute_names(), score in 0.0f64..=1.0) {
        let mut editor = TableEditor::new(&TableOptions::default());
        for name in &names {
            editor.add_value(name.clone()).unwrap();
        }
        if names.len() > 1 {
            editor.set_cell(&names[0], &names[1], score).unwrap();
            editor.update_grid();
            prop_assert_eq!(editor.cell(&names[0], &names[1]), Some(&json!(score)));
        }
    }
}
