//! Aggregated payroll rows and the department payroll table.
//!
//! A [`PayrollRow`] is built once per active employee by the payroll
//! aggregator and is not modified afterwards. A [`PayrollTable`] keeps the
//! rows together with the export column order so the summary can be written
//! back out as a sheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{CellValue, DateField, SheetTable};

/// Header of the derived gross pay column.
pub const GROSS_PAY: &str = "Gross Pay";
/// Header of the derived total deduction column.
pub const TOTAL_DEDUCTION: &str = "Total Deduction";
/// Header of the derived net pay column.
pub const NET_PAY: &str = "Net Pay";
/// All derived column headers, in export order.
pub const DERIVED_COLUMNS: [&str; 3] = [GROSS_PAY, TOTAL_DEDUCTION, NET_PAY];

/// One employee's pay for the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRow {
    /// The employee's name.
    pub name: String,
    /// The employee number.
    pub employee_number: String,
    /// The cost-center value of the row.
    pub department: String,
    /// The join date.
    pub joined: DateField,
    /// The resignation date; always missing for aggregated rows.
    pub resign: DateField,
    /// Numeric value of every non-identity column, keyed by header.
    pub amounts: HashMap<String, Decimal>,
    /// Sum of the earning components.
    pub gross_pay: Decimal,
    /// Sum of the employee-side statutory deductions.
    pub total_deduction: Decimal,
    /// Gross pay less total deduction.
    pub net_pay: Decimal,
}

impl PayrollRow {
    /// Returns the numeric value of a column, zero when the column is absent.
    ///
    /// Derived columns return the computed totals.
    pub fn amount(&self, column: &str) -> Decimal {
        match column {
            GROSS_PAY => self.gross_pay,
            TOTAL_DEDUCTION => self.total_deduction,
            NET_PAY => self.net_pay,
            _ => self.amounts.get(column).copied().unwrap_or(Decimal::ZERO),
        }
    }
}

/// Headers that carry identity and date data instead of amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityColumns {
    /// Employee name header.
    pub name: String,
    /// Employee number header.
    pub employee_number: String,
    /// Resolved cost-center header.
    pub cost_center: String,
    /// Join date header.
    pub joined: String,
    /// Resignation date header.
    pub resign: String,
}

/// The aggregated payroll of one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollTable {
    /// The department (cost-center value) the rows belong to.
    pub department: String,
    /// Identity column headers of the source sheet.
    pub identity: IdentityColumns,
    /// Export column order.
    pub columns: Vec<String>,
    /// Active employees of the department.
    pub rows: Vec<PayrollRow>,
}

impl PayrollTable {
    /// Returns the number of employees.
    pub fn headcount(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has a column with exactly this header.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Sums a column over all rows; absent columns sum to zero.
    ///
    /// Returns `None` if the sum overflows.
    pub fn column_total(&self, column: &str) -> Option<Decimal> {
        self.rows
            .iter()
            .try_fold(Decimal::ZERO, |acc, row| acc.checked_add(row.amount(column)))
    }

    /// Returns the cell shown for `column` of `row`.
    pub fn cell(&self, row: &PayrollRow, column: &str) -> CellValue {
        let text = |s: &str| {
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.to_string())
            }
        };

        if column == self.identity.name {
            text(&row.name)
        } else if column == self.identity.employee_number {
            text(&row.employee_number)
        } else if column == self.identity.cost_center {
            text(&row.department)
        } else if column == self.identity.joined {
            row.joined.to_cell()
        } else if column == self.identity.resign {
            row.resign.to_cell()
        } else {
            CellValue::Number(row.amount(column))
        }
    }

    /// Converts the table back into sheet form, one cell per export column.
    pub fn to_sheet_table(&self) -> SheetTable {
        let rows = self
            .rows
            .iter()
            .map(|row| self.columns.iter().map(|c| self.cell(row, c)).collect())
            .collect();

        SheetTable::new(self.department.clone(), self.columns.clone(), rows)
    }
}
