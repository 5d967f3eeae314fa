//! Per-employee gross pay, deductions and net pay.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::config::ColumnConfig;
use crate::error::{InvoiceError, InvoiceResult};
use crate::models::{
    DERIVED_COLUMNS, IdentityColumns, PayrollRow, PayrollTable, SheetTable,
};

/// Aggregates the filtered rows of one department.
///
/// Every column other than the identity columns (name, employee number,
/// cost center, join and resign dates) is coerced to a number, unparseable
/// cells counting as zero. For each row:
///
/// - Gross Pay is the sum of the configured earning columns,
/// - Total Deduction is the sum of the configured deduction columns,
/// - Net Pay is Gross Pay less Total Deduction.
///
/// Absent earning or deduction columns contribute zero; absent deduction
/// columns are added to the export columns. Derived columns already present
/// in the input are recomputed rather than summed, so aggregating an
/// exported summary again gives the same table.
///
/// # Errors
///
/// Returns [`InvoiceError::InvoiceGeneration`] if a row's sums overflow.
pub fn aggregate_payroll(
    table: &SheetTable,
    cost_center: &str,
    department: &str,
    columns: &ColumnConfig,
) -> InvoiceResult<PayrollTable> {
    let identity = IdentityColumns {
        name: columns.name.clone(),
        employee_number: columns.employee_number.clone(),
        cost_center: cost_center.to_string(),
        joined: columns.joined.clone(),
        resign: columns.resign.clone(),
    };

    let input_columns: Vec<&String> = table
        .headers
        .iter()
        .filter(|h| !DERIVED_COLUMNS.contains(&h.as_str()))
        .collect();

    let mut export_columns: Vec<String> = input_columns.iter().map(|h| h.to_string()).collect();
    for deduction in &columns.deductions {
        if !export_columns.contains(deduction) {
            export_columns.push(deduction.clone());
        }
    }
    export_columns.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let amounts: HashMap<String, Decimal> = input_columns
                .iter()
                .filter(|h| !columns.is_identity_column(h, cost_center))
                .map(|h| (h.to_string(), table.cell(row, h).to_decimal()))
                .collect();

            let gross_pay = sum_columns(&amounts, &columns.earnings, "gross pay")?;
            let total_deduction = sum_columns(&amounts, &columns.deductions, "total deduction")?;
            let net_pay = gross_pay
                .checked_sub(total_deduction)
                .ok_or_else(|| overflow("net pay"))?;

            Ok(PayrollRow {
                name: table.cell(row, &columns.name).display_text(),
                employee_number: table.cell(row, &columns.employee_number).display_text(),
                department: table.cell(row, cost_center).display_text(),
                joined: table.cell(row, &columns.joined).to_date_field(),
                resign: table.cell(row, &columns.resign).to_date_field(),
                amounts,
                gross_pay,
                total_deduction,
                net_pay,
            })
        })
        .collect::<InvoiceResult<Vec<_>>>()?;

    Ok(PayrollTable {
        department: department.to_string(),
        identity,
        columns: export_columns,
        rows,
    })
}

fn sum_columns(
    amounts: &HashMap<String, Decimal>,
    names: &[String],
    what: &str,
) -> InvoiceResult<Decimal> {
    names
        .iter()
        .filter_map(|name| amounts.get(name))
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> InvoiceError {
    InvoiceError::InvoiceGeneration {
        message: format!("arithmetic overflow computing {what}"),
    }
}
