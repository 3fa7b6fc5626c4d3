//! Similarity-table editing.
//!
//! Cells are held as raw JSON values while editing so that half-typed input
//! survives until save, where every declared pair must be numeric.

use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::TableOptions;

use super::EditorError;

/// Scratch state for a Table similarity.
///
/// `grid[query][case]` is keyed by value name. In symmetric mode the cells
/// with `row < column` (by position in [`values`](Self::values)) mirror their
/// transposed cell and cannot be edited directly.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEditor {
    values: Vec<String>,
    is_symmetric: bool,
    grid: IndexMap<String, IndexMap<String, Value>>,
}

impl TableEditor {
    /// Seed from stored options, then fill unset cells.
    pub fn new(options: &TableOptions) -> Self {
        let grid = options
            .sim_grid
            .iter()
            .map(|(query, row)| {
                let row = row
                    .iter()
                    .map(|(case, score)| (case.clone(), Value::from(*score)))
                    .collect();
                (query.clone(), row)
            })
            .collect();

        let mut editor = Self {
            values: options.values.clone(),
            is_symmetric: options.is_symmetric,
            grid,
        };
        editor.update_grid();
        editor.make_symmetric();
        editor
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    /// Raw cell content.
    pub fn cell(&self, query: &str, case: &str) -> Option<&Value> {
        self.grid.get(query).and_then(|row| row.get(case))
    }

    /// Declare a new value and give it default cells.
    pub fn add_value(&mut self, value: impl Into<String>) -> Result<(), EditorError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EditorError::EmptyValue);
        }
        if self.values.contains(&value) {
            return Err(EditorError::DuplicateValue(value));
        }
        self.values.push(value);
        self.update_grid();
        Ok(())
    }

    /// Drop a value together with its row and column.
    pub fn remove_value(&mut self, value: &str) -> Result<(), EditorError> {
        let index = self.position(value)?;
        self.values.remove(index);
        self.grid.shift_remove(value);
        for row in self.grid.values_mut() {
            row.shift_remove(value);
        }
        Ok(())
    }

    /// Give every unset pair a default: 1.0 on the diagonal, 0.0 elsewhere.
    ///
    /// Cells that already hold something are left alone.
    pub fn update_grid(&mut self) {
        for query in &self.values {
            let row = self.grid.entry(query.clone()).or_default();
            for case in &self.values {
                row.entry(case.clone())
                    .or_insert_with(|| Value::from(if query == case { 1.0 } else { 0.0 }));
            }
        }
    }

    /// Switch symmetric mode; turning it on copies the lower triangle up.
    pub fn set_symmetric(&mut self, on: bool) {
        self.is_symmetric = on;
        if on {
            self.make_symmetric();
        }
    }

    /// Overwrite `grid[v1][v2]` with `grid[v2][v1]` for each `v2` listed after `v1`,
    /// and reset every self-pair to 1.0.
    ///
    /// Does nothing unless symmetric mode is on.
    pub fn make_symmetric(&mut self) {
        if !self.is_symmetric {
            return;
        }
        for (i, v1) in self.values.iter().enumerate() {
            self.grid
                .entry(v1.clone())
                .or_default()
                .insert(v1.clone(), Value::from(1.0));
            for v2 in &self.values[i + 1..] {
                let Some(lower) = self.grid.get(v2).and_then(|row| row.get(v1)).cloned() else {
                    continue;
                };
                self.grid
                    .entry(v1.clone())
                    .or_default()
                    .insert(v2.clone(), lower);
            }
        }
    }

    /// Whether the cell at (row, column) position is read-only.
    pub fn is_cell_disabled(&self, idx1: usize, idx2: usize) -> bool {
        idx1 == idx2 || (self.is_symmetric && idx1 < idx2)
    }

    /// Write one cell; mirrored to the transposed cell in symmetric mode.
    pub fn set_cell(
        &mut self,
        query: &str,
        case: &str,
        value: impl Into<Value>,
    ) -> Result<(), EditorError> {
        let row = self.position(query)?;
        let column = self.position(case)?;
        if self.is_cell_disabled(row, column) {
            return Err(EditorError::CellLocked {
                query: query.to_string(),
                case: case.to_string(),
            });
        }

        let value = value.into();
        if self.is_symmetric {
            self.grid
                .entry(case.to_string())
                .or_default()
                .insert(query.to_string(), value.clone());
        }
        self.grid
            .entry(query.to_string())
            .or_default()
            .insert(case.to_string(), value);
        Ok(())
    }

    /// Validate and convert to stored options.
    ///
    /// Only declared values are kept; every declared pair must hold a finite
    /// number or a numeric string.
    pub fn to_options(&self) -> Result<TableOptions, EditorError> {
        let mut sim_grid = IndexMap::with_capacity(self.values.len());
        for query in &self.values {
            let mut row = IndexMap::with_capacity(self.values.len());
            for case in &self.values {
                let cell = self.cell(query, case).ok_or_else(|| EditorError::MissingCell {
                    query: query.clone(),
                    case: case.clone(),
                })?;
                let score = numeric_cell(cell).ok_or_else(|| EditorError::NonNumericCell {
                    query: query.clone(),
                    case: case.clone(),
                    value: cell.to_string(),
                })?;
                row.insert(case.clone(), score);
            }
            sim_grid.insert(query.clone(), row);
        }

        let options = TableOptions {
            values: self.values.clone(),
            is_symmetric: self.is_symmetric,
            sim_grid,
        };
        if options.is_symmetric {
            check_symmetric(&options)?;
        }
        Ok(options)
    }

    fn position(&self, value: &str) -> Result<usize, EditorError> {
        self.values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| EditorError::UnknownValue(value.to_string()))
    }
}

fn numeric_cell(cell: &Value) -> Option<f64> {
    let number = match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn check_symmetric(options: &TableOptions) -> Result<(), EditorError> {
    for (i, a) in options.values.iter().enumerate() {
        if options.score(a, a) != Some(1.0) {
            return Err(EditorError::DiagonalNotOne(a.clone()));
        }
        for b in &options.values[i + 1..] {
            if options.score(a, b) != options.score(b, a) {
                return Err(EditorError::AsymmetricGrid {
                    a: a.clone(),
                    b: b.clone(),
                });
            }
        }
    }
    Ok(())
}
