//! Payroll summary workbook, written with `rust_xlsxwriter`.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::{InvoiceError, InvoiceResult};
use crate::models::{CellValue, PayrollTable};

const MAX_SHEET_NAME_CHARS: usize = 31;

/// Turns a department into a valid worksheet name.
///
/// Excel names hold at most 31 characters, none of `[ ] : * ? / \`, and may
/// not start or end with an apostrophe.
///
/// # Example
///
/// ```
/// use payroll_invoice::export::sheet_name;
///
/// assert_eq!(sheet_name("HQ"), "HQ");
/// assert_eq!(sheet_name("Ops/KL [North]"), "Ops_KL _North_");
/// ```
pub fn sheet_name(department: &str) -> String {
    let replaced: String = department
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME_CHARS)
        .collect();

    let trimmed = replaced.trim_matches('\'').trim();
    if trimmed.is_empty() {
        "Summary".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Renders the aggregated payroll as a single-sheet workbook.
///
/// The first row holds the export column headers; each following row is one
/// employee. Amounts are written as numbers, identity columns as text and
/// dates as `YYYY-MM-DD` text.
pub fn render_summary_xlsx(table: &PayrollTable) -> InvoiceResult<Vec<u8>> {
    let export_err = |e: rust_xlsxwriter::XlsxError| InvoiceError::export("xlsx", e);

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(&table.department))
        .map_err(export_err)?;

    for (col, header) in table.columns.iter().enumerate() {
        let col = column_index(col)?;
        worksheet
            .write_string_with_format(0, col, header, &header_format)
            .map_err(export_err)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let xl_row = u32::try_from(row_idx + 1)
            .map_err(|_| InvoiceError::export("xlsx", "too many rows"))?;

        for (col, header) in table.columns.iter().enumerate() {
            let col = column_index(col)?;
            match table.cell(row, header) {
                CellValue::Empty => {}
                CellValue::Number(n) => {
                    let value = n.to_f64().ok_or_else(|| {
                        InvoiceError::export("xlsx", format!("amount {n} is not representable"))
                    })?;
                    worksheet
                        .write_number(xl_row, col, value)
                        .map_err(export_err)?;
                }
                CellValue::Bool(b) => {
                    worksheet
                        .write_boolean(xl_row, col, b)
                        .map_err(export_err)?;
                }
                other => {
                    worksheet
                        .write_string(xl_row, col, other.display_text())
                        .map_err(export_err)?;
                }
            }
        }
    }

    workbook.save_to_buffer().map_err(export_err)
}

fn column_index(col: usize) -> InvoiceResult<u16> {
    u16::try_from(col).map_err(|_| InvoiceError::export("xlsx", "too many columns"))
}
