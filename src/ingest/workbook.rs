//! Workbook reading backed by `calamine`.

use std::io::Cursor;

use calamine::{Data, Reader, Sheets, open_workbook_auto_from_rs};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::debug;

use crate::config::ColumnConfig;
use crate::error::{InvoiceError, InvoiceResult};
use crate::models::{CellValue, SheetTable};

use super::headers::{clean_headers, find_header_row};

/// An uploaded payroll workbook held in memory.
///
/// The format (xlsx, xlsm, xlsb, xls or ods) is detected from the content.
pub struct Workbook {
    sheets: Sheets<Cursor<Vec<u8>>>,
    sheet_names: Vec<String>,
}

impl Workbook {
    /// Opens a workbook from its bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> InvoiceResult<Self> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes.into())).map_err(|e| {
            InvoiceError::WorkbookUnreadable {
                message: e.to_string(),
            }
        })?;
        let sheet_names = sheets.sheet_names().to_owned();

        Ok(Self {
            sheets,
            sheet_names,
        })
    }

    /// Returns the sheet names in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Reads every row of a sheet as cells.
    pub fn grid(&mut self, sheet: &str) -> InvoiceResult<Vec<Vec<CellValue>>> {
        if !self.sheet_names.iter().any(|name| name == sheet) {
            return Err(InvoiceError::SheetNotFound {
                sheet: sheet.to_string(),
            });
        }

        let range = self
            .sheets
            .worksheet_range(sheet)
            .map_err(|e| InvoiceError::WorkbookUnreadable {
                message: format!("read worksheet {sheet}: {e}"),
            })?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(to_cell).collect())
            .collect())
    }

    /// Reads a sheet below its header row.
    ///
    /// The header row is the first row containing a cell whose text equals
    /// `marker`. Headers are cleaned and de-duplicated, and fully blank data
    /// rows are dropped.
    pub fn sheet_table(
        &mut self,
        sheet: &str,
        columns: &ColumnConfig,
        marker: &str,
    ) -> InvoiceResult<SheetTable> {
        let grid = self.grid(sheet)?;
        sheet_table_from_grid(sheet, grid, columns, marker)
    }
}

/// Builds a [`SheetTable`] from raw rows.
pub fn sheet_table_from_grid(
    sheet: &str,
    mut grid: Vec<Vec<CellValue>>,
    columns: &ColumnConfig,
    marker: &str,
) -> InvoiceResult<SheetTable> {
    let header_idx =
        find_header_row(&grid, marker).ok_or_else(|| InvoiceError::HeaderRowNotFound {
            sheet: sheet.to_string(),
            marker: marker.to_string(),
        })?;

    let data = grid.split_off(header_idx + 1);
    let kept = clean_headers(&grid[header_idx], columns);

    let rows: Vec<Vec<CellValue>> = data
        .into_iter()
        .filter(|row| !row.iter().all(CellValue::is_blank))
        .map(|row| {
            kept.iter()
                .map(|(idx, _)| row.get(*idx).cloned().unwrap_or(CellValue::Empty))
                .collect()
        })
        .collect();

    debug!(
        sheet = %sheet,
        header_row = header_idx,
        columns = kept.len(),
        rows = rows.len(),
        "Parsed sheet"
    );

    let headers = kept.into_iter().map(|(_, header)| header).collect();
    Ok(SheetTable::new(sheet, headers, rows))
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => match Decimal::from_f64(*f) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Error(f.to_string()),
        },
        Data::Int(i) => CellValue::Number(Decimal::from(*i)),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => CellValue::Date(d.date()),
            None => CellValue::Text(data.to_string()),
        },
        Data::Error(e) => CellValue::Error(format!("{e:?}")),
        other => CellValue::Text(other.to_string()),
    }
}
