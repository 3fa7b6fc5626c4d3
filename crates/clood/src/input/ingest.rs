//! Case file ingestion.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::schema::{Attribute, AttributeType};

use super::coerce::coerce_value;
use super::source::SourceMetadata;
use super::splitter::split_fields;
use super::IngestError;

/// One case: attribute name to value, in column order.
pub type Case = IndexMap<String, Value>;

/// Validated cases ready for upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseBatch {
    /// Column names in file order.
    #[serde(rename = "columnHeads")]
    pub column_heads: Vec<String>,
    pub data: Vec<Case>,
    /// Set by [`CaseIngestor::ingest_file`].
    #[serde(skip)]
    pub source: Option<SourceMetadata>,
}

impl CaseBatch {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ingestion settings.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Ignore lines that are empty after trimming.
    pub skip_blank_lines: bool,
    /// Coerce values to the attribute's declared type.
    pub coerce_types: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            skip_blank_lines: true,
            coerce_types: true,
        }
    }
}

/// Reads case files against a project's attributes.
pub struct CaseIngestor<'a> {
    attributes: &'a [Attribute],
    config: IngestConfig,
}

impl<'a> CaseIngestor<'a> {
    pub fn new(attributes: &'a [Attribute]) -> Self {
        Self {
            attributes,
            config: IngestConfig::default(),
        }
    }

    pub fn with_config(attributes: &'a [Attribute], config: IngestConfig) -> Self {
        Self { attributes, config }
    }

    /// Read, hash and ingest a file.
    pub fn ingest_file(&self, path: impl AsRef<Path>) -> Result<CaseBatch, IngestError> {
        let path = path.as_ref();
        let read_error = |message: String| IngestError::Read {
            path: path.to_path_buf(),
            message,
        };

        let contents = fs::read(path).map_err(|e| read_error(e.to_string()))?;
        let hash = format!("sha256:{:x}", Sha256::digest(&contents));
        let size_bytes = contents.len() as u64;
        let text = String::from_utf8(contents).map_err(|e| read_error(e.to_string()))?;

        let mut batch = self.ingest_str(&text)?;
        batch.source = Some(SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            batch.data.len(),
            batch.column_heads.len(),
        ));
        Ok(batch)
    }

    /// Ingest file text. The first line is the header.
    pub fn ingest_str(&self, text: &str) -> Result<CaseBatch, IngestError> {
        let mut lines = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
            .filter(|(_, line)| !(self.config.skip_blank_lines && line.trim().is_empty()));

        let (_, header) = lines.next().ok_or(IngestError::Empty)?;
        let column_heads: Vec<String> = header.split(',').map(|h| h.trim().to_string()).collect();
        self.check_columns(&column_heads)?;

        let column_types: Vec<AttributeType> = column_heads
            .iter()
            .map(|name| {
                self.attributes
                    .iter()
                    .find(|a| &a.name == name)
                    .map(|a| a.attr_type)
                    .unwrap_or_default()
            })
            .collect();

        let mut data = Vec::new();
        for (line_no, line) in lines {
            data.push(self.parse_row(line_no, line, &column_heads, &column_types)?);
        }

        debug!(rows = data.len(), columns = column_heads.len(), "cases ingested");
        Ok(CaseBatch {
            column_heads,
            data,
            source: None,
        })
    }

    fn check_columns(&self, column_heads: &[String]) -> Result<(), IngestError> {
        if column_heads.len() != self.attributes.len() {
            return Err(IngestError::ColumnCountMismatch {
                expected: self.attributes.len(),
                found: column_heads.len(),
            });
        }

        let known: HashSet<&str> = self.attributes.iter().map(|a| a.name.as_str()).collect();
        let unknown: Vec<String> = column_heads
            .iter()
            .filter(|h| !known.contains(h.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(IngestError::UnknownColumns(unknown));
        }

        let present: HashSet<&str> = column_heads.iter().map(String::as_str).collect();
        let missing: Vec<String> = self
            .attributes
            .iter()
            .filter(|a| !present.contains(a.name.as_str()))
            .map(|a| a.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }
        Ok(())
    }

    fn parse_row(
        &self,
        line_no: usize,
        line: &str,
        column_heads: &[String],
        column_types: &[AttributeType],
    ) -> Result<Case, IngestError> {
        let fields = split_fields(line);
        if fields.len() != column_heads.len() {
            return Err(IngestError::SeparatorCountMismatch {
                line: line_no,
                expected: column_heads.len() - 1,
                found: fields.len() - 1,
            });
        }

        let mut case = Case::with_capacity(fields.len());
        for ((field, column), attr_type) in fields.iter().zip(column_heads).zip(column_types) {
            let text = field.trim();
            let value = if text.is_empty() {
                Value::Null
            } else {
                serde_json::from_str(text).map_err(|_| IngestError::InvalidLiteral {
                    line: line_no,
                    column: column.clone(),
                    text: text.to_string(),
                })?
            };

            let value = if self.config.coerce_types {
                coerce_value(value, *attr_type).ok_or_else(|| IngestError::TypeMismatch {
                    line: line_no,
                    column: column.clone(),
                    expected: *attr_type,
                    text: text.to_string(),
                })?
            } else {
                value
            };
            case.insert(column.clone(), value);
        }
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Similarity;
    use serde_json::json;

    fn attrs(columns: &[(&str, AttributeType)]) -> Vec<Attribute> {
        columns
            .iter()
            .map(|(name, t)| Attribute::new(*name, *t, Similarity::Equal))
            .collect()
    }

    #[test]
    fn test_quoted_comma_field() {
        let attributes = attrs(&[("a", AttributeType::String), ("b", AttributeType::Integer)]);
        let batch = CaseIngestor::new(&attributes)
            .ingest_str("a,b\n\"x,y\",5\n")
            .unwrap();
        assert_eq!(batch.data.len(), 1);
        assert_eq!(batch.data[0]["a"], json!("x,y"));
        assert_eq!(batch.data[0]["b"], json!(5));
    }

    #[test]
    fn test_array_literal_field() {
        let attributes = attrs(&[("a", AttributeType::Integer), ("b", AttributeType::Integer)]);
        let batch = CaseIngestor::new(&attributes)
            .ingest_str("a,b\n[1,2,3],5")
            .unwrap();
        assert_eq!(batch.data[0]["a"], json!([1, 2, 3]));
        assert_eq!(batch.data[0]["b"], json!(5));
    }

    #[test]
    fn test_header_order_drives_columns() {
        let attributes = attrs(&[("a", AttributeType::Integer), ("b", AttributeType::String)]);
        let batch = CaseIngestor::new(&attributes)
            .ingest_str(" b , a \r\n\"one\",1\r\n")
            .unwrap();
        assert_eq!(batch.column_heads, vec!["b", "a"]);
        let keys: Vec<&String> = batch.data[0].keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_column_count_mismatch() {
        let attributes = attrs(&[
            ("a", AttributeType::Integer),
            ("b", AttributeType::Integer),
            ("c", AttributeType::Integer),
            ("d", AttributeType::Integer),
        ]);
        let err = CaseIngestor::new(&attributes)
            .ingest_str("a,b,c\n1,2,3")
            .unwrap_err();
        assert_eq!(
            err,
            IngestError::ColumnCountMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_unknown_and_missing_columns() {
        let attributes = attrs(&[("a", AttributeType::Integer), ("b", AttributeType::Integer)]);
        let ingestor = CaseIngestor::new(&attributes);

        let err = ingestor.ingest_str("a,z\n1,2").unwrap_err();
        assert_eq!(err, IngestError::UnknownColumns(vec!["z".to_string()]));
        assert_eq!(err.to_string(), "Columns not in project: z");

        let err = ingestor.ingest_str("a,a\n1,2").unwrap_err();
        assert_eq!(err, IngestError::MissingColumns(vec!["b".to_string()]));
    }

    #[test]
    fn test_separator_mismatch_reports_line() {
        let attributes = attrs(&[("a", AttributeType::Integer), ("b", AttributeType::Integer)]);
        let err = CaseIngestor::new(&attributes)
            .ingest_str("a,b\n1,2\n\n1,2,3")
            .unwrap_err();
        assert_eq!(
            err,
            IngestError::SeparatorCountMismatch {
                line: 4,
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_invalid_literal() {
        let attributes = attrs(&[("a", AttributeType::String), ("b", AttributeType::Integer)]);
        let err = CaseIngestor::new(&attributes)
            .ingest_str("a,b\nbare words,1")
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidLiteral { line: 2, .. }));
    }

    #[test]
    fn test_empty_field_is_null() {
        let attributes = attrs(&[("a", AttributeType::Integer), ("b", AttributeType::Integer)]);
        let batch = CaseIngestor::new(&attributes).ingest_str("a,b\n ,7").unwrap();
        assert_eq!(batch.data[0]["a"], Value::Null);
    }

    #[test]
    fn test_type_mismatch_and_opt_out() {
        let attributes = attrs(&[("a", AttributeType::Integer), ("b", AttributeType::Boolean)]);
        let text = "a,b\n\"ten\",true";

        let err = CaseIngestor::new(&attributes).ingest_str(text).unwrap_err();
        assert!(matches!(err, IngestError::TypeMismatch { .. }));

        let config = IngestConfig {
            coerce_types: false,
            ..IngestConfig::default()
        };
        let batch = CaseIngestor::with_config(&attributes, config)
            .ingest_str(text)
            .unwrap();
        assert_eq!(batch.data[0]["a"], json!("ten"));
    }

    #[test]
    fn test_integer_beyond_i64_is_type_mismatch() {
        let attributes = attrs(&[("n", AttributeType::Integer)]);

        let err = CaseIngestor::new(&attributes)
            .ingest_str("n\n7\n1e20\n")
            .unwrap_err();
        match err {
            IngestError::TypeMismatch { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "n");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let attributes = attrs(&[("a", AttributeType::Integer)]);
        assert_eq!(
            CaseIngestor::new(&attributes).ingest_str("\n\n").unwrap_err(),
            IngestError::Empty
        );
    }

    #[test]
    fn test_wire_shape() {
        let attributes = attrs(&[("a", AttributeType::Integer)]);
        let batch = CaseIngestor::new(&attributes).ingest_str("a\n1\n2").unwrap();
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!({"columnHeads": ["a"], "data": [{"a": 1}, {"a": 2}]})
        );
    }
}
