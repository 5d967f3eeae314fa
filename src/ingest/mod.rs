//! Workbook ingestion.
//!
//! Reads uploaded workbook bytes, locates the header row of a payroll sheet
//! and produces a cleaned, header-addressed [`SheetTable`](crate::models::SheetTable).

mod headers;
mod workbook;

pub use headers::{clean_header, clean_headers, find_header_row};
pub use workbook::{Workbook, sheet_table_from_grid};
