//! Payroll Invoice Engine
//!
//! This crate turns a raw payroll workbook into a department invoice. It
//! reads an uploaded spreadsheet, matches loosely named columns, filters one
//! department's active employees, computes gross pay, deductions and net pay
//! per employee, and derives the invoice line items and tax totals. The
//! summary and invoice can be exported as xlsx, docx and pdf documents.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
