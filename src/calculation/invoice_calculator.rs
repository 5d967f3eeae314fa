//! Department invoice calculation.
//!
//! The invoice bills a department for the wages, overtime, employer
//! statutory contributions and HRDF levy of its active employees, plus a
//! per-head insurance claim and a management fee, then applies a flat tax.
//! All arithmetic is checked `Decimal` arithmetic; nothing is rounded here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ColumnConfig, InvoiceSettings};
use crate::error::{InvoiceError, InvoiceResult};
use crate::models::{
    GROSS_PAY, Invoice, InvoiceBreakdown, InvoiceLineItem, InvoiceTotals, PayrollTable,
};

use super::column_matcher::sum_matching;

/// Computes the invoice for an aggregated department table.
///
/// # Line items
///
/// 1. Wages: total gross pay less overtime
/// 2. Overtime: total of the overtime columns
/// 3. Employer Statutory: employer EPF, EIS and Socso, matched by alias
/// 4. HRDF: total of the HRDF column
/// 5. Medical Fee: placeholder without a value
/// 6. Insurance Claim: headcount times the per-head fee
/// 7. Management Fee: rate times (wages + overtime + statutory + HRDF)
///
/// Columns missing from the table contribute zero. The subtotal is the sum of
/// all priced lines; tax is the tax rate times the subtotal.
///
/// # Errors
///
/// Returns [`InvoiceError::InvoiceGeneration`] if any sum or product overflows.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use payroll_invoice::calculation::calculate_invoice;
/// use payroll_invoice::config::{ColumnConfig, InvoiceSettings};
/// use payroll_invoice::models::{IdentityColumns, PayrollTable};
/// use rust_decimal::Decimal;
///
/// let table = PayrollTable {
///     department: "HQ".into(),
///     identity: IdentityColumns {
///         name: "Name".into(),
///         employee_number: "Emp No".into(),
///         cost_center: "C/Center".into(),
///         joined: "Joined".into(),
///         resign: "Resign".into(),
///     },
///     columns: vec![],
///     rows: vec![],
/// };
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let invoice = calculate_invoice(&table, &ColumnConfig::default(), &InvoiceSettings::default(), date)?;
/// assert_eq!(invoice.line_items.len(), 7);
/// assert_eq!(invoice.totals.total_incl_tax, Decimal::ZERO);
/// # Ok::<(), payroll_invoice::error::InvoiceError>(())
/// ```
pub fn calculate_invoice(
    table: &PayrollTable,
    columns: &ColumnConfig,
    settings: &InvoiceSettings,
    date: NaiveDate,
) -> InvoiceResult<Invoice> {
    let headcount = u32::try_from(table.headcount()).map_err(|_| InvoiceError::InvoiceGeneration {
        message: format!("headcount {} is too large", table.headcount()),
    })?;

    let gross_pay = column_total(table, GROSS_PAY)?;
    let overtime = checked_sum(
        columns
            .overtime
            .iter()
            .map(|column| column_total(table, column))
            .collect::<InvoiceResult<Vec<_>>>()?,
        "overtime",
    )?;
    let wages = gross_pay
        .checked_sub(overtime)
        .ok_or_else(|| overflow("wages"))?;

    let employer_statutory = checked_sum(
        columns
            .employer_statutory
            .iter()
            .map(|group| sum_matching(table, group.aliases.as_slice()))
            .collect::<InvoiceResult<Vec<_>>>()?,
        "employer statutory",
    )?;

    let hrdf = column_total(table, &columns.hrdf)?;

    let management_base = checked_sum([wages, overtime, employer_statutory, hrdf], "management fee base")?;
    let management_fee = management_base
        .checked_mul(settings.management_fee_rate)
        .ok_or_else(|| overflow("management fee"))?;

    let line_items = vec![
        InvoiceLineItem::priced(1, "Wages", 1, wages)?,
        InvoiceLineItem::priced(2, "Overtime", 1, overtime)?,
        InvoiceLineItem::priced(3, "Employer Statutory (EPF+Socso+EIS)", 1, employer_statutory)?,
        InvoiceLineItem::priced(4, "HRDF", 1, hrdf)?,
        InvoiceLineItem::placeholder(5, "Medical Fee (Excl. Mgmt Fee)"),
        InvoiceLineItem::priced(
            6,
            "Insurance Claim (Excl. Mgmt Fee)",
            headcount,
            settings.insurance_fee_per_head,
        )?,
        InvoiceLineItem::priced(
            7,
            &format!("{}% Management Fee", percent(settings.management_fee_rate)?),
            1,
            management_fee,
        )?,
    ];

    let total_excl_tax = checked_sum(
        line_items.iter().filter_map(|line| line.amount),
        "total excluding tax",
    )?;
    let tax_amount = total_excl_tax
        .checked_mul(settings.tax_rate)
        .ok_or_else(|| overflow("tax"))?;
    let total_incl_tax = total_excl_tax
        .checked_add(tax_amount)
        .ok_or_else(|| overflow("total including tax"))?;

    debug!(
        department = %table.department,
        headcount,
        wages = %wages,
        overtime = %overtime,
        employer_statutory = %employer_statutory,
        hrdf = %hrdf,
        total_incl_tax = %total_incl_tax,
        "Calculated invoice"
    );

    Ok(Invoice {
        department: table.department.clone(),
        date,
        headcount,
        breakdown: InvoiceBreakdown {
            wages,
            overtime,
            employer_statutory,
            hrdf,
            management_fee,
        },
        line_items,
        totals: InvoiceTotals {
            total_excl_tax,
            tax_amount,
            total_incl_tax,
        },
        currency: settings.currency.clone(),
        tax_label: settings.tax_label.clone(),
        tax_rate: settings.tax_rate,
    })
}

/// Formats a rate as a percentage without trailing zeros (0.15 becomes "15").
///
/// # Errors
///
/// Returns [`InvoiceError::InvoiceGeneration`] if the rate is too large to
/// scale by one hundred.
pub fn percent(rate: Decimal) -> InvoiceResult<String> {
    rate.checked_mul(Decimal::ONE_HUNDRED)
        .map(|p| p.normalize().to_string())
        .ok_or_else(|| overflow("percentage"))
}

fn column_total(table: &PayrollTable, column: &str) -> InvoiceResult<Decimal> {
    table.column_total(column).ok_or_else(|| overflow(column))
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>, what: &str) -> InvoiceResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> InvoiceError {
    InvoiceError::InvoiceGeneration {
        message: format!("arithmetic overflow computing {what}"),
    }
}
