//! Default catalog as installed by the server.

use once_cell::sync::Lazy;

use super::{AttributeOption, Catalog};

const BASIC_REUSE: &[&str] = &["Best Match"];
const NUMERIC_REUSE: &[&str] = &["Best Match", "Maximum", "Minimum", "Mean", "Median"];

pub(super) static BUILTIN_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let mut integer_reuse = NUMERIC_REUSE.to_vec();
    integer_reuse.push("Mode");

    Catalog {
        attribute_options: vec![
            entry(
                "String",
                &[
                    "Equal",
                    "EqualIgnoreCase",
                    "BM25",
                    "Semantic USE",
                    "Semantic SBERT",
                    "Array",
                    "Array SBERT",
                    "None",
                ],
                BASIC_REUSE,
            ),
            entry(
                "Integer",
                &[
                    "Equal",
                    "Nearest Number",
                    "McSherry More",
                    "McSherry Less",
                    "INRECA More",
                    "INRECA Less",
                    "Interval",
                    "Array",
                    "None",
                ],
                &integer_reuse,
            ),
            entry(
                "Float",
                &[
                    "Equal",
                    "Nearest Number",
                    "McSherry More",
                    "McSherry Less",
                    "INRECA More",
                    "INRECA Less",
                    "Interval",
                    "Array",
                    "None",
                ],
                NUMERIC_REUSE,
            ),
            entry(
                "Categorical",
                &[
                    "Equal",
                    "EqualIgnoreCase",
                    "Table",
                    "EnumDistance",
                    "Query Intersection",
                    "None",
                ],
                BASIC_REUSE,
            ),
            entry("Boolean", &["Equal", "None"], NUMERIC_REUSE),
            entry("Date", &["Nearest Date", "None"], BASIC_REUSE),
            entry("Location", &["Nearest Location", "None"], BASIC_REUSE),
            entry(
                "Ontology Concept",
                &["Path-based", "Feature-based", "None"],
                BASIC_REUSE,
            ),
            entry("Object", &["None"], BASIC_REUSE),
        ],
    }
});

fn entry(type_name: &str, similarity_types: &[&str], reuse_strategy: &[&str]) -> AttributeOption {
    AttributeOption {
        type_name: type_name.to_string(),
        similarity_types: similarity_types.iter().map(|s| s.to_string()).collect(),
        reuse_strategy: reuse_strategy.iter().map(|s| s.to_string()).collect(),
    }
}
