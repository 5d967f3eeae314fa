//! Department invoice models.
//!
//! This module contains the [`Invoice`] type and its line items and totals.
//! All amounts are full-precision decimals; rounding to two places happens
//! only when a document is rendered.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InvoiceError, InvoiceResult};

/// One line of the department invoice.
///
/// # Example
///
/// ```
/// use payroll_invoice::models::InvoiceLineItem;
/// use rust_decimal::Decimal;
///
/// let line = InvoiceLineItem::priced(6, "Insurance Claim (Excl. Mgmt Fee)", 5, Decimal::from(50))?;
/// assert_eq!(line.amount, Some(Decimal::from(250)));
/// # Ok::<(), payroll_invoice::error::InvoiceError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// The line number, starting at 1.
    pub number: u32,
    /// The line description.
    pub description: String,
    /// The quantity billed.
    pub quantity: u32,
    /// The unit price; `None` for placeholder lines.
    pub unit_price: Option<Decimal>,
    /// Quantity times unit price; `None` for placeholder lines.
    pub amount: Option<Decimal>,
}

impl InvoiceLineItem {
    /// Creates a line whose amount is quantity times unit price.
    ///
    /// Returns [`InvoiceError::InvoiceGeneration`] if the product overflows.
    pub fn priced(
        number: u32,
        description: &str,
        quantity: u32,
        unit_price: Decimal,
    ) -> InvoiceResult<Self> {
        let amount = unit_price.checked_mul(Decimal::from(quantity)).ok_or_else(|| {
            InvoiceError::InvoiceGeneration {
                message: format!("arithmetic overflow computing {description}"),
            }
        })?;

        Ok(Self {
            number,
            description: description.to_string(),
            quantity,
            unit_price: Some(unit_price),
            amount: Some(amount),
        })
    }

    /// Creates a placeholder line with no price and no amount.
    pub fn placeholder(number: u32, description: &str) -> Self {
        Self {
            number,
            description: description.to_string(),
            quantity: 1,
            unit_price: None,
            amount: None,
        }
    }

    /// Returns true if the line carries no computed value.
    pub fn is_placeholder(&self) -> bool {
        self.amount.is_none()
    }
}

/// The department-level figures the line items are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceBreakdown {
    /// Gross pay less overtime.
    pub wages: Decimal,
    /// Sum of the overtime columns.
    pub overtime: Decimal,
    /// Employer EPF, EIS and Socso contributions.
    pub employer_statutory: Decimal,
    /// HRDF levy.
    pub hrdf: Decimal,
    /// Management fee on wages, overtime, statutory and HRDF.
    pub management_fee: Decimal,
}

/// Invoice totals before and after tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all line amounts.
    pub total_excl_tax: Decimal,
    /// Tax on the subtotal.
    pub tax_amount: Decimal,
    /// Subtotal plus tax.
    pub total_incl_tax: Decimal,
}

/// The invoice billed to one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// The department billed.
    pub department: String,
    /// The issue date.
    pub date: NaiveDate,
    /// Number of active employees billed.
    pub headcount: u32,
    /// The figures behind the line items.
    pub breakdown: InvoiceBreakdown,
    /// The seven invoice lines, in order.
    pub line_items: Vec<InvoiceLineItem>,
    /// Totals before and after tax.
    pub totals: InvoiceTotals,
    /// Currency prefix (e.g., "RM").
    pub currency: String,
    /// Tax label (e.g., "SST").
    pub tax_label: String,
    /// The tax rate applied.
    pub tax_rate: Decimal,
}
