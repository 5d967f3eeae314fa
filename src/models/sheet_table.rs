//! Header-addressed sheet data.

use serde::{Deserialize, Serialize};

use super::CellValue;

/// The data rows of one sheet below its header row.
///
/// Every row has exactly one cell per header; short rows are padded with
/// [`CellValue::Empty`] and cells beyond the last header are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetTable {
    /// The sheet the rows were read from.
    pub sheet: String,
    /// Cleaned header names in column order.
    pub headers: Vec<String>,
    /// Data rows, one cell per header.
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    /// Creates a table, normalizing every row to the header width.
    pub fn new(sheet: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self {
            sheet: sheet.into(),
            headers,
            rows,
        }
    }

    /// Returns the index of the column with exactly this header.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Returns the cell at `column` of `row`, or `Empty` when the column is absent.
    pub fn cell<'a>(&'a self, row: &'a [CellValue], header: &str) -> &'a CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.column_index(header)
            .and_then(|idx| row.get(idx))
            .unwrap_or(EMPTY)
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sheet has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
