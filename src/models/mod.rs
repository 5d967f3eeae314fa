//! Core data models for the payroll invoice engine.
//!
//! This module contains the domain models used throughout the pipeline:
//! sheet cells, header-addressed sheet tables, aggregated payroll rows and
//! the department invoice.

mod cell;
mod invoice;
mod payroll_row;
mod sheet_table;

pub use cell::{CellValue, DateField};
pub use invoice::{Invoice, InvoiceBreakdown, InvoiceLineItem, InvoiceTotals};
pub use payroll_row::{
    DERIVED_COLUMNS, GROSS_PAY, IdentityColumns, NET_PAY, PayrollRow, PayrollTable,
    TOTAL_DEDUCTION,
};
pub use sheet_table::SheetTable;

/// The selections that drive one pass through the pipeline.
///
/// # Example
///
/// ```
/// use payroll_invoice::models::ProcessingRequest;
///
/// let request = ProcessingRequest::new("March", "HQ");
/// assert_eq!(request.department, "HQ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProcessingRequest {
    /// The sheet to process.
    pub sheet: String,
    /// The cost-center value to bill.
    pub department: String,
}

impl ProcessingRequest {
    /// Creates a request for a sheet and department.
    pub fn new(sheet: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            department: department.into(),
        }
    }
}
