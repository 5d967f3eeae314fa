//! Error types for the payroll invoice engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that stops a payroll summary or invoice from being
//! produced. Missing pay-component columns and unparseable cells are not
//! errors: they are coerced to zero (or a missing date) by the calculators.

use thiserror::Error;

/// The main error type for the payroll invoice engine.
///
/// # Example
///
/// ```
/// use payroll_invoice::error::InvoiceError;
///
/// let error = InvoiceError::SheetNotFound {
///     sheet: "March".to_string(),
/// };
/// assert_eq!(error.to_string(), "Sheet not found: March");
/// ```
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The uploaded bytes are not a readable workbook.
    #[error("Workbook could not be read: {message}")]
    WorkbookUnreadable {
        /// A description of the read failure.
        message: String,
    },

    /// The requested sheet does not exist in the workbook.
    #[error("Sheet not found: {sheet}")]
    SheetNotFound {
        /// The sheet name that was requested.
        sheet: String,
    },

    /// No row of the sheet contains the header marker cell.
    #[error("Header row not found in sheet '{sheet}': no cell equals '{marker}'")]
    HeaderRowNotFound {
        /// The sheet that was searched.
        sheet: String,
        /// The marker text that identifies the header row.
        marker: String,
    },

    /// A column required to process the sheet could not be matched by any alias.
    #[error("{canonical} column not found (tried: {tried})")]
    UnresolvedRequiredColumn {
        /// The canonical name of the column.
        canonical: String,
        /// The aliases that were tried, comma separated.
        tried: String,
    },

    /// The username/password pair is not on the allow-list.
    #[error("Incorrect username or password")]
    Unauthorized,

    /// The invoice could not be computed.
    #[error("Invoice generation failed: {message}")]
    InvoiceGeneration {
        /// A description of the failure.
        message: String,
    },

    /// A document could not be rendered.
    #[error("Failed to export {format} document: {message}")]
    Export {
        /// The document format ("xlsx", "docx" or "pdf").
        format: String,
        /// A description of the rendering failure.
        message: String,
    },
}

impl InvoiceError {
    pub(crate) fn export(format: &str, err: impl std::fmt::Display) -> Self {
        InvoiceError::Export {
            format: format.to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return InvoiceError.
pub type InvoiceResult<T> = Result<T, InvoiceError>;
