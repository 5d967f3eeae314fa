//! Money formatting and the text shared by the invoice documents.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculation::percent;
use crate::error::InvoiceResult;
use crate::models::Invoice;

/// Formats an amount with two decimals and comma thousands separators.
///
/// # Example
///
/// ```
/// use payroll_invoice::export::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::new(1492560, 2)), "14,925.60");
/// ```
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{dec_part}")
}

/// Returns the invoice lines as table cells: number, description, quantity,
/// unit price and amount. Placeholder lines have blank price and amount.
pub fn invoice_table_rows(invoice: &Invoice) -> Vec<[String; 5]> {
    invoice
        .line_items
        .iter()
        .map(|line| {
            [
                line.number.to_string(),
                line.description.clone(),
                line.quantity.to_string(),
                line.unit_price.map(format_money).unwrap_or_default(),
                line.amount.map(format_money).unwrap_or_default(),
            ]
        })
        .collect()
}

/// Returns the three total lines printed under the line-item table.
pub fn total_lines(invoice: &Invoice) -> InvoiceResult<[String; 3]> {
    let currency = &invoice.currency;
    let tax = &invoice.tax_label;
    let totals = &invoice.totals;

    Ok([
        format!(
            "Total (Excl. {tax}): {currency} {}",
            format_money(totals.total_excl_tax)
        ),
        format!(
            "{tax} @{}%: {currency} {}",
            percent(invoice.tax_rate)?,
            format_money(totals.tax_amount)
        ),
        format!(
            "Total (Incl. {tax}): {currency} {}",
            format_money(totals.total_incl_tax)
        ),
    ])
}
