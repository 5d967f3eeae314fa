//! Department and active-employee row selection.

use crate::config::ColumnConfig;
use crate::models::SheetTable;

/// Keeps the rows of one department whose employees have not resigned.
///
/// The cost-center cell must display exactly `department` (no trimming or
/// case folding). A row is active only when its resign cell is blank; a
/// resign cell holding a date, or any text that is not a date, excludes the
/// row. Applying the filter to its own output returns the same table.
///
/// # Example
///
/// ```
/// use payroll_invoice::calculation::filter_department;
/// use payroll_invoice::config::ColumnConfig;
/// use payroll_invoice::models::{CellValue, SheetTable};
///
/// let table = SheetTable::new(
///     "Sheet1",
///     vec!["C/Center".into(), "Resign".into()],
///     vec![
///         vec![CellValue::Text("HQ".into()), CellValue::Empty],
///         vec![CellValue::Text("HQ".into()), CellValue::Text("2024-01-01".into())],
///         vec![CellValue::Text("OPS".into()), CellValue::Empty],
///     ],
/// );
///
/// let filtered = filter_department(&table, "C/Center", "HQ", &ColumnConfig::default());
/// assert_eq!(filtered.len(), 1);
/// ```
pub fn filter_department(
    table: &SheetTable,
    cost_center: &str,
    department: &str,
    columns: &ColumnConfig,
) -> SheetTable {
    let rows = table
        .rows
        .iter()
        .filter(|row| table.cell(row, cost_center).display_text() == department)
        .filter(|row| table.cell(row, &columns.resign).to_date_field().is_missing())
        .cloned()
        .collect();

    SheetTable::new(table.sheet.clone(), table.headers.clone(), rows)
}
