//! Performance benchmarks for the payroll invoice engine.
//!
//! Covers the in-memory pipeline (filter, aggregate, invoice) at several
//! sheet sizes and the full `/invoice` request including workbook parsing.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_invoice::api::{AppState, create_router};
use payroll_invoice::calculation::{aggregate_payroll, calculate_invoice, filter_department};
use payroll_invoice::config::{ColumnConfig, ConfigLoader, InvoiceSettings};
use payroll_invoice::models::{CellValue, SheetTable};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const HEADERS: [&str; 12] = [
    "No.", "Name", "C/Center", "Resign", "M/Basic", "OT Amt 1½", "BOT", "EPF", "Socso", "EIS",
    "EPF ER", "HRDF",
];

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/payroll").expect("Failed to load config");
    AppState::new(config)
}

/// Builds a sheet with `rows` employees spread over four departments.
fn create_sheet(rows: usize) -> SheetTable {
    let departments = ["HQ", "OPS", "FIN", "IT"];
    let data = (0..rows)
        .map(|i| {
            let resign = if i % 10 == 9 {
                CellValue::Text("2024-06-30".into())
            } else {
                CellValue::Empty
            };
            let mut row = vec![
                CellValue::Number(Decimal::from(i + 1)),
                CellValue::Text(format!("Employee {i}")),
                CellValue::Text(departments[i % departments.len()].into()),
                resign,
            ];
            row.extend(
                [2500, 120, 40, 280, 15, 5, 340, 25]
                    .iter()
                    .map(|n| CellValue::Number(Decimal::from(*n))),
            );
            row
        })
        .collect();

    SheetTable::new("Bench", HEADERS.iter().map(|h| h.to_string()).collect(), data)
}

/// Writes a sheet of `rows` employees as xlsx bytes.
fn create_workbook(rows: usize) -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Bench").unwrap();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for i in 0..rows {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, (i + 1) as f64).unwrap();
        sheet.write_string(row, 1, format!("Employee {i}")).unwrap();
        sheet.write_string(row, 2, if i % 2 == 0 { "HQ" } else { "OPS" }).unwrap();
        for (offset, amount) in [2500.0, 120.0, 40.0, 280.0, 15.0, 5.0, 340.0, 25.0]
            .iter()
            .enumerate()
        {
            sheet.write_number(row, 4 + offset as u16, *amount).unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Benchmark: filter, aggregate and invoice at increasing sheet sizes.
fn bench_pipeline_scaling(c: &mut Criterion) {
    let columns = ColumnConfig::default();
    let settings = InvoiceSettings::default();
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

    let mut group = c.benchmark_group("pipeline");

    for rows in [10usize, 100, 1000, 5000] {
        let sheet = create_sheet(rows);

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &sheet, |b, sheet| {
            b.iter(|| {
                let filtered = filter_department(sheet, "C/Center", "HQ", &columns);
                let payroll = aggregate_payroll(&filtered, "C/Center", "HQ", &columns).unwrap();
                let invoice = calculate_invoice(&payroll, &columns, &settings, date).unwrap();
                black_box(invoice)
            })
        });
    }

    group.finish();
}

/// Benchmark: full `/invoice` request with a 200-employee workbook.
fn bench_invoice_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let workbook = create_workbook(200);

    c.bench_function("invoice_request_200_rows", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/invoice?sheet=Bench&department=HQ&date=2025-01-31")
                        .header("x-username", "alice")
                        .header("x-password", "wonderland123")
                        .body(Body::from(workbook.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_pipeline_scaling, bench_invoice_request);
criterion_main!(benches);
