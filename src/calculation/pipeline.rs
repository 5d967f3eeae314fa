//! The forward pipeline from workbook to invoice.
//!
//! Workbook → sheet table → department rows → aggregated payroll → invoice.
//! Every stage takes its inputs explicitly; nothing is carried between
//! requests.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::InvoiceResult;
use crate::ingest::Workbook;
use crate::models::{Invoice, PayrollTable, ProcessingRequest, SheetTable};

use super::column_matcher::{list_departments, resolve_cost_center};
use super::invoice_calculator::calculate_invoice;
use super::payroll_aggregator::aggregate_payroll;
use super::row_filter::filter_department;

/// The departments found in one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentListing {
    /// The sheet header resolved as the cost-center column.
    pub cost_center_column: String,
    /// Distinct cost-center values in order of first appearance.
    pub departments: Vec<String>,
}

/// The aggregated payroll and invoice of one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentReport {
    /// Active employees of the department with derived pay columns.
    pub payroll: PayrollTable,
    /// The invoice billed for those employees.
    pub invoice: Invoice,
}

/// Reads a sheet of the workbook using the configured column layout.
pub fn read_sheet(
    workbook: &mut Workbook,
    sheet: &str,
    config: &PayrollConfig,
) -> InvoiceResult<SheetTable> {
    workbook.sheet_table(sheet, config.columns(), &config.settings().header_marker)
}

/// Lists the departments of a sheet.
///
/// # Errors
///
/// Fails if the sheet has no cost-center column.
pub fn departments(table: &SheetTable, config: &PayrollConfig) -> InvoiceResult<DepartmentListing> {
    let cost_center_column = resolve_cost_center(&table.headers, &config.columns().cost_center)?;
    let departments = list_departments(table, &cost_center_column);

    Ok(DepartmentListing {
        cost_center_column,
        departments,
    })
}

/// Filters and aggregates the active employees of one department.
pub fn summarize_department(
    table: &SheetTable,
    department: &str,
    config: &PayrollConfig,
) -> InvoiceResult<PayrollTable> {
    let columns = config.columns();
    let cost_center = resolve_cost_center(&table.headers, &columns.cost_center)?;

    let filtered = filter_department(table, &cost_center, department, columns);
    let payroll = aggregate_payroll(&filtered, &cost_center, department, columns)?;

    debug!(
        sheet = %table.sheet,
        department = %department,
        cost_center = %cost_center,
        rows_in_sheet = table.len(),
        headcount = payroll.headcount(),
        "Summarized department payroll"
    );

    Ok(payroll)
}

/// Runs the whole pipeline for one request.
pub fn process(
    workbook: &mut Workbook,
    request: &ProcessingRequest,
    config: &PayrollConfig,
    date: NaiveDate,
) -> InvoiceResult<DepartmentReport> {
    let table = read_sheet(workbook, &request.sheet, config)?;
    let payroll = summarize_department(&table, &request.department, config)?;
    let invoice = calculate_invoice(&payroll, config.columns(), config.settings(), date)?;

    Ok(DepartmentReport { payroll, invoice })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvoiceError;
    use crate::models::CellValue;
    use rust_decimal::Decimal;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn num(n: i64) -> CellValue {
        CellValue::Number(Decimal::from(n))
    }

    fn sheet() -> SheetTable {
        SheetTable::new(
            "Jan",
            vec![
                "Name".into(),
                "Cost Center".into(),
                "Resign".into(),
                "M/Basic".into(),
                "OT Amt 1½".into(),
                "EPF".into(),
            ],
            vec![
                vec![text("Ali"), text("HQ"), CellValue::Empty, num(3000), num(200), num(300)],
                vec![text("Siti"), text("HQ"), text("2024-01-01"), num(2500), num(0), num(250)],
                vec![text("Raj"), text("OPS"), CellValue::Empty, num(2000), num(0), num(200)],
            ],
        )
    }

    #[test]
    fn test_departments_lists_cost_centers() {
        let listing = departments(&sheet(), &PayrollConfig::default()).unwrap();
        assert_eq!(listing.cost_center_column, "Cost Center");
        assert_eq!(listing.departments, vec!["HQ", "OPS"]);
    }

    #[test]
    fn test_summarize_department_excludes_resigned() {
        let payroll = summarize_department(&sheet(), "HQ", &PayrollConfig::default()).unwrap();
        assert_eq!(payroll.headcount(), 1);
        assert_eq!(payroll.rows[0].name, "Ali");
        assert_eq!(payroll.rows[0].gross_pay, Decimal::from(3200));
        assert_eq!(payroll.identity.cost_center, "Cost Center");
    }

    #[test]
    fn test_missing_cost_center_is_fatal() {
        let table = SheetTable::new("Jan", vec!["Name".into()], vec![vec![text("Ali")]]);
        let result = summarize_department(&table, "HQ", &PayrollConfig::default());
        assert!(matches!(
            result,
            Err(InvoiceError::UnresolvedRequiredColumn { .. })
        ));
    }
}
