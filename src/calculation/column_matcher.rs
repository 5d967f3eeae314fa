//! Loose header matching.
//!
//! Payroll exports spell the same column many ways ("EPF ER", "EPF'ER",
//! "EPF\u{2019}ER", "epfer"). Headers are compared after keeping only ASCII
//! letters and lowercasing them. Target spellings are tried in order and,
//! for each target, headers are scanned in column order; the first match wins.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::config::AliasGroup;
use crate::error::{InvoiceError, InvoiceResult};
use crate::models::{PayrollTable, SheetTable};

/// Reduces a header to its lowercase ASCII letters.
///
/// # Example
///
/// ```
/// use payroll_invoice::calculation::normalize_header;
///
/// assert_eq!(normalize_header("EPF 'ER"), "epfer");
/// assert_eq!(normalize_header("C/Center"), "ccenter");
/// ```
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Finds the first header matching any of the targets.
///
/// Targets are tried in priority order.
pub fn resolve_column<'a, T: AsRef<str>>(headers: &'a [String], targets: &[T]) -> Option<&'a str> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    targets.iter().find_map(|target| {
        let key = normalize_header(target.as_ref());
        normalized
            .iter()
            .position(|n| *n == key)
            .map(|idx| headers[idx].as_str())
    })
}

/// Sums the first column of the table matching any of the targets.
///
/// Returns zero when no column matches.
pub fn sum_matching<T: AsRef<str>>(table: &PayrollTable, targets: &[T]) -> InvoiceResult<Decimal> {
    match resolve_column(&table.columns, targets) {
        Some(column) => table
            .column_total(column)
            .ok_or_else(|| InvoiceError::InvoiceGeneration {
                message: format!("arithmetic overflow summing column '{column}'"),
            }),
        None => Ok(Decimal::ZERO),
    }
}

/// Resolves the sheet header holding the cost center.
///
/// This column is required: without it no department can be selected.
pub fn resolve_cost_center(headers: &[String], group: &AliasGroup) -> InvoiceResult<String> {
    resolve_column(headers, group.aliases.as_slice())
        .map(str::to_string)
        .ok_or_else(|| InvoiceError::UnresolvedRequiredColumn {
            canonical: group.name.clone(),
            tried: group.aliases.join(", "),
        })
}

/// Lists the distinct non-blank values of the cost-center column in order of first appearance.
pub fn list_departments(table: &SheetTable, cost_center: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    table
        .rows
        .iter()
        .map(|row| table.cell(row, cost_center))
        .filter(|cell| !cell.is_blank())
        .map(|cell| cell.display_text())
        .filter(|dept| seen.insert(dept.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnConfig;
    use crate::models::CellValue;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_spelling_variants_normalize_equal() {
        let variants = ["EPF'ER", "epf er", "EPFER", "EPF\u{2019}ER", "EPF`ER", " EPF-ER 1 "];
        for variant in variants {
            assert_eq!(normalize_header(variant), "epfer", "variant {variant:?}");
        }
    }

    #[test]
    fn test_resolve_column_matches_any_variant() {
        let cols = headers(&["No.", "Name", "epf 'er", "EIS ER"]);
        let targets = ["EPF ER", "EPF'ER", "EPFER"];
        assert_eq!(resolve_column(&cols, &targets), Some("epf 'er"));
    }

    #[test]
    fn test_resolve_column_prefers_earlier_target() {
        // "SOC ER" appears first in the sheet but "Socso ER" has priority.
        let cols = headers(&["SOC ER", "SOCSO ER"]);
        let targets = ["Socso ER", "SOC ER"];
        assert_eq!(resolve_column(&cols, &targets), Some("SOCSO ER"));
    }

    #[test]
    fn test_resolve_column_first_header_wins_for_one_target() {
        let cols = headers(&["C Center", "C-Center"]);
        assert_eq!(resolve_column(&cols, &["C/Center"]), Some("C Center"));
    }

    #[test]
    fn test_resolve_cost_center_variants() {
        let group = ColumnConfig::default().cost_center;
        for header in ["C/Center", "cost center", "CENTER", "C-Center", "C Center"] {
            let cols = headers(&["No.", header, "Name"]);
            assert_eq!(resolve_cost_center(&cols, &group).unwrap(), header);
        }
    }

    #[test]
    fn test_resolve_cost_center_missing_is_error() {
        let group = ColumnConfig::default().cost_center;
        let cols = headers(&["No.", "Name", "Dept"]);

        match resolve_cost_center(&cols, &group) {
            Err(InvoiceError::UnresolvedRequiredColumn { canonical, tried }) => {
                assert_eq!(canonical, "Cost Center");
                assert!(tried.starts_with("C/Center"));
            }
            other => panic!("Expected UnresolvedRequiredColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_sum_matching_missing_column_is_zero() {
        use crate::models::{IdentityColumns, PayrollTable};

        let table = PayrollTable {
            department: "HQ".into(),
            identity: IdentityColumns {
                name: "Name".into(),
                employee_number: "Emp No".into(),
                cost_center: "C/Center".into(),
                joined: "Joined".into(),
                resign: "Resign".into(),
            },
            columns: headers(&["Name", "C/Center"]),
            rows: vec![],
        };

        assert_eq!(sum_matching(&table, &["HRDF"]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_list_departments_in_first_appearance_order() {
        let table = SheetTable::new(
            "Sheet1",
            headers(&["Name", "C/Center"]),
            vec![
                vec![CellValue::Text("A".into()), CellValue::Text("OPS".into())],
                vec![CellValue::Text("B".into()), CellValue::Text("HQ".into())],
                vec![CellValue::Text("C".into()), CellValue::Empty],
                vec![CellValue::Text("D".into()), CellValue::Text("OPS".into())],
                vec![CellValue::Text("E".into()), CellValue::Number(100.into())],
            ],
        );

        assert_eq!(list_departments(&table, "C/Center"), vec!["OPS", "HQ", "100"]);
    }
}
