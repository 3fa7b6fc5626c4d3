//! CSV export of retrieved cases.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;

use crate::error::Result;
use crate::schema::Attribute;

use super::request::ScoredCase;

/// Write cases with one column per attribute.
///
/// Cells hold the JSON encoding of each value and are written unquoted, so the
/// output can be ingested again. Missing and null values are left empty.
pub fn export_best_k<W: Write>(
    writer: W,
    attributes: &[Attribute],
    cases: &[ScoredCase],
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(attributes.iter().map(|a| a.name.as_str()))?;
    for case in cases {
        let mut record = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            let cell = match case.fields.get(&attribute.name) {
                None | Some(Value::Null) => String::new(),
                Some(value) => serde_json::to_string(value)?,
            };
            record.push(cell);
        }
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeType, Similarity};
    use serde_json::json;

    #[test]
    fn test_export_format() {
        let attributes = vec![
            Attribute::new("make", AttributeType::String, Similarity::Equal),
            Attribute::new("tags", AttributeType::String, Similarity::Array),
            Attribute::new("year", AttributeType::Integer, Similarity::Equal),
        ];
        let cases = vec![ScoredCase {
            score: 0.5,
            match_explanation: None,
            fields: serde_json::from_value(json!({"make": "a,b", "tags": ["x", "y"], "year": null}))
                .unwrap(),
        }];

        let mut out = Vec::new();
        export_best_k(&mut out, &attributes, &cases).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "make,tags,year\r\n\"a,b\",[\"x\",\"y\"],\r\n"
        );
    }
}
