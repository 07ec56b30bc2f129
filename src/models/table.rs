use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

use super::cell_value::CellValue;

/// One listed catalog object: at least a `NAME` key, often a `TYPE` key.
pub type CatalogEntry = HashMap<String, CellValue>;

/// Typed, rectangular query result.
///
/// Columns appear in first-seen order across the response rows. Rows the
/// engine sent without some column are padded with [`CellValue::Null`], so
/// every row has exactly `columns.len()` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build from explicit columns and positional rows.
    ///
    /// Short rows are padded with `Null`; long rows are truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build from JSON row objects, taking the union of their keys as columns.
    pub fn from_json_rows(json_rows: Vec<Map<String, JsonValue>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for row in &json_rows {
            for key in row.keys() {
                if !index.contains_key(key) {
                    index.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let width = columns.len();
        let mut rows = Vec::with_capacity(json_rows.len());
        for json_row in json_rows {
            let mut row = vec![CellValue::Null; width];
            for (key, value) in json_row {
                if let Some(&i) = index.get(&key) {
                    row[i] = CellValue::from(value);
                }
            }
            rows.push(row);
        }

        Self { columns, rows }
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Single cell by row position and column name.
    pub fn get(&self, row_idx: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row_idx)?.get(col)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[col]).collect())
    }

    /// Rename a column in place. Returns false when `from` does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(i) => {
                self.columns[i] = to.to_string();
                true
            },
            None => false,
        }
    }

    /// Replace every value of column `col` with `f(value)`.
    pub(crate) fn map_column<F>(&mut self, col: usize, mut f: F)
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(col) {
                *cell = f(cell);
            }
        }
    }

    /// Get a row as a HashMap by index (for convenience)
    pub fn row_as_map(&self, row_idx: usize) -> Option<HashMap<String, CellValue>> {
        let row = self.rows.get(row_idx)?;
        let mut map = HashMap::with_capacity(self.columns.len());
        for (name, value) in self.columns.iter().zip(row) {
            map.insert(name.clone(), value.clone());
        }
        Some(map)
    }

    /// Get all rows as HashMaps (for convenience)
    pub fn rows_as_maps(&self) -> Vec<HashMap<String, CellValue>> {
        (0..self.rows.len())
            .filter_map(|i| self.row_as_map(i))
            .collect()
    }

    /// Consume the table into one record per row, every column present.
    pub fn into_records(self) -> Vec<HashMap<String, CellValue>> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect()
    }
}
