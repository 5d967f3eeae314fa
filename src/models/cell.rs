//! Cell values read from a payroll workbook.
//!
//! This module defines [`CellValue`], the workbook-independent form of a
//! spreadsheet cell, and [`DateField`], the lenient parse of a date column.
//! Numeric coercion and date parsing never fail: unparseable numbers become
//! zero and unparseable dates are kept as [`DateField::Unparsed`].

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Text date layouts accepted for join and resignation dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%d %b %Y", "%d-%b-%Y",
];

/// Text date-time layouts accepted for join and resignation dates.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A single spreadsheet cell.
///
/// # Example
///
/// ```
/// use payroll_invoice::models::CellValue;
/// use rust_decimal::Decimal;
///
/// assert_eq!(CellValue::Text(" 120.50 ".into()).to_decimal(), Decimal::new(12050, 2));
/// assert_eq!(CellValue::Text("n/a".into()).to_decimal(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// The cell holds nothing.
    Empty,
    /// A text cell.
    Text(String),
    /// A numeric cell.
    Number(Decimal),
    /// A boolean cell.
    Bool(bool),
    /// A date cell.
    Date(NaiveDate),
    /// A spreadsheet error such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    /// Returns true if the cell is empty or holds only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the text a user sees in the cell.
    ///
    /// Numbers are printed without trailing zeros so that a numeric cost
    /// center such as `100.0` reads as `100`.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.normalize().to_string(),
            CellValue::Bool(b) => b.to_string().to_uppercase(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }

    /// Coerces the cell to a number, treating anything unparseable as zero.
    pub fn to_decimal(&self) -> Decimal {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Bool(true) => Decimal::ONE,
            CellValue::Text(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .unwrap_or(Decimal::ZERO)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Parses the cell as a date.
    ///
    /// Blank cells are [`DateField::Missing`]; anything else that is not a
    /// recognisable date is [`DateField::Unparsed`].
    pub fn to_date_field(&self) -> DateField {
        match self {
            CellValue::Date(d) => DateField::Date(*d),
            cell if cell.is_blank() => DateField::Missing,
            CellValue::Text(s) => match parse_date_text(s.trim()) {
                Some(d) => DateField::Date(d),
                None => DateField::Unparsed(s.clone()),
            },
            other => DateField::Unparsed(other.display_text()),
        }
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// A leniently parsed date column value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum DateField {
    /// The cell was blank.
    Missing,
    /// The cell held a recognisable date.
    Date(NaiveDate),
    /// The cell held something that is not a date.
    Unparsed(String),
}

impl DateField {
    /// Returns true if no value was present.
    pub fn is_missing(&self) -> bool {
        matches!(self, DateField::Missing)
    }

    /// Converts the field back into a cell for export.
    pub fn to_cell(&self) -> CellValue {
        match self {
            DateField::Missing => CellValue::Empty,
            DateField::Date(d) => CellValue::Date(*d),
            DateField::Unparsed(s) => CellValue::Text(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(CellValue::Number(Decimal::new(3000, 0)).to_decimal(), Decimal::new(3000, 0));
        assert_eq!(CellValue::Text("1e3".into()).to_decimal(), Decimal::new(1000, 0));
        assert_eq!(CellValue::Text("1,000".into()).to_decimal(), Decimal::ZERO);
        assert_eq!(CellValue::Bool(true).to_decimal(), Decimal::ONE);
        assert_eq!(CellValue::Error("#N/A".into()).to_decimal(), Decimal::ZERO);
        assert_eq!(CellValue::Empty.to_decimal(), Decimal::ZERO);
    }

    #[test]
    fn test_display_text_normalizes_numbers() {
        assert_eq!(CellValue::Number(Decimal::new(1000, 1)).display_text(), "100");
        assert_eq!(CellValue::Text("HQ".into()).display_text(), "HQ");
        assert_eq!(CellValue::Date(date(2024, 1, 1)).display_text(), "2024-01-01");
    }

    #[test]
    fn test_date_parsing_formats() {
        for text in ["2024-01-31", "31/01/2024", "31-01-2024", "31.01.2024", "31 Jan 2024", "2024-01-31 00:00:00"] {
            assert_eq!(
                CellValue::Text(text.into()).to_date_field(),
                DateField::Date(date(2024, 1, 31)),
                "failed for {text}"
            );
        }
    }

    #[test]
    fn test_blank_dates_are_missing() {
        assert!(CellValue::Empty.to_date_field().is_missing());
        assert!(CellValue::Text("   ".into()).to_date_field().is_missing());
    }

    #[test]
    fn test_unparseable_dates_are_kept() {
        assert_eq!(
            CellValue::Text("left in June".into()).to_date_field(),
            DateField::Unparsed("left in June".into())
        );
        assert_eq!(
            CellValue::Number(Decimal::new(45292, 0)).to_date_field(),
            DateField::Unparsed("45292".into())
        );
    }

    #[test]
    fn test_date_field_to_cell() {
        assert_eq!(DateField::Missing.to_cell(), CellValue::Empty);
        assert_eq!(
            DateField::Date(date(2024, 1, 1)).to_cell(),
            CellValue::Date(date(2024, 1, 1))
        );
    }
}
