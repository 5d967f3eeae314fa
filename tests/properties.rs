//! Property tests for header matching, filtering, aggregation and invoicing.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_invoice::calculation::{
    aggregate_payroll, calculate_invoice, filter_department, normalize_header, resolve_column,
};
use payroll_invoice::config::{ColumnConfig, InvoiceSettings};
use payroll_invoice::models::{CellValue, SheetTable};

const HEADERS: [&str; 9] = [
    "Name", "C/Center", "Resign", "M/Basic", "OT Amt 1½", "EPF", "PCB", "EPF ER", "HRDF",
];

/// Cents in a realistic payroll range, as an exact decimal.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..2_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn resign_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        Just(CellValue::Text("  ".into())),
        Just(CellValue::Text("2024-01-01".into())),
        Just(CellValue::Text("resigned".into())),
        Just(CellValue::Date(NaiveDate::from_ymd_opt(2023, 6, 30).unwrap())),
    ]
}

fn payroll_row() -> impl Strategy<Value = Vec<CellValue>> {
    (
        prop_oneof![Just("HQ"), Just("OPS"), Just("hq")],
        resign_cell(),
        proptest::collection::vec(amount(), 5),
    )
        .prop_map(|(dept, resign, amounts)| {
            let mut row = vec![
                CellValue::Text("Employee".into()),
                CellValue::Text(dept.to_string()),
                resign,
            ];
            row.extend(amounts.into_iter().map(CellValue::Number));
            row
        })
}

fn payroll_sheet() -> impl Strategy<Value = SheetTable> {
    proptest::collection::vec(payroll_row(), 0..20).prop_map(|rows| {
        SheetTable::new(
            "Sheet1",
            HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
        )
    })
}

/// "EPF" and "ER" joined by arbitrary punctuation and spacing, in any case.
fn epf_er_spelling() -> impl Strategy<Value = String> {
    (
        "[ '`\u{2018}\u{2019}._-]{0,3}",
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(sep, upper_epf, upper_er)| {
            let epf = if upper_epf { "EPF" } else { "epf" };
            let er = if upper_er { "ER" } else { "er" };
            format!("{epf}{sep}{er}")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn spelling_variants_resolve_to_the_same_group(spelling in epf_er_spelling()) {
        prop_assert_eq!(normalize_header(&spelling), "epfer");

        let headers = vec!["Name".to_string(), spelling.clone()];
        let targets = ["EPF ER", "EPF'ER", "EPFER"];
        prop_assert_eq!(resolve_column(&headers, &targets), Some(spelling.as_str()));
    }

    #[test]
    fn filtering_is_idempotent(table in payroll_sheet()) {
        let columns = ColumnConfig::default();
        let once = filter_department(&table, "C/Center", "HQ", &columns);
        let twice = filter_department(&once, "C/Center", "HQ", &columns);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn net_pay_is_gross_less_deduction(table in payroll_sheet()) {
        let columns = ColumnConfig::default();
        let filtered = filter_department(&table, "C/Center", "HQ", &columns);
        let payroll = aggregate_payroll(&filtered, "C/Center", "HQ", &columns).unwrap();

        for row in &payroll.rows {
            prop_assert_eq!(row.gross_pay, row.amount("M/Basic") + row.amount("OT Amt 1½"));
            prop_assert_eq!(row.total_deduction, row.amount("EPF") + row.amount("PCB"));
            prop_assert_eq!(row.net_pay, row.gross_pay - row.total_deduction);
        }
    }

    #[test]
    fn total_including_tax_is_subtotal_times_one_point_zero_eight(table in payroll_sheet()) {
        let columns = ColumnConfig::default();
        let filtered = filter_department(&table, "C/Center", "HQ", &columns);
        let payroll = aggregate_payroll(&filtered, "C/Center", "HQ", &columns).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

        let invoice = calculate_invoice(&payroll, &columns, &InvoiceSettings::default(), date).unwrap();
        let totals = &invoice.totals;

        let line_sum: Decimal = invoice.line_items.iter().filter_map(|l| l.amount).sum();
        prop_assert_eq!(totals.total_excl_tax, line_sum);
        prop_assert_eq!(totals.total_incl_tax, totals.total_excl_tax * Decimal::new(108, 2));
        prop_assert_eq!(
            invoice.breakdown.management_fee,
            (invoice.breakdown.wages
                + invoice.breakdown.overtime
                + invoice.breakdown.employer_statutory
                + invoice.breakdown.hrdf)
                * Decimal::new(15, 2)
        );
    }
}
