//! Calculation logic for the payroll invoice engine.
//!
//! This module contains the column matcher that resolves loosely spelled
//! headers, the department row filter, the per-employee payroll aggregator,
//! the department invoice calculator and the pipeline that chains them.

mod column_matcher;
mod invoice_calculator;
mod payroll_aggregator;
mod pipeline;
mod row_filter;

pub use column_matcher::{
    list_departments, normalize_header, resolve_column, resolve_cost_center, sum_matching,
};
pub use invoice_calculator::{calculate_invoice, percent};
pub use payroll_aggregator::aggregate_payroll;
pub use pipeline::{
    DepartmentListing, DepartmentReport, departments, process, read_sheet, summarize_department,
};
pub use row_filter::filter_department;
