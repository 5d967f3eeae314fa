//! Document exporters.
//!
//! The aggregated payroll is exported as an xlsx workbook and the invoice as
//! docx and pdf documents. Exporters return the document bytes; nothing is
//! written to disk. Money is rounded to two decimals with thousands
//! separators only here.

mod docx;
mod money;
mod pdf;
mod xlsx;

pub use docx::render_invoice_docx;
pub use money::{format_money, invoice_table_rows, total_lines};
pub use pdf::render_invoice_pdf;
pub use xlsx::{render_summary_xlsx, sheet_name};

use serde::Serialize;

/// Column headers of the invoice line-item table.
pub const INVOICE_TABLE_HEADERS: [&str; 5] = ["No.", "Description", "Qty", "U.Price", "Amount"];

/// The document formats the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// The payroll summary workbook.
    Xlsx,
    /// The invoice as a Word document.
    Docx,
    /// The invoice as a PDF.
    Pdf,
}

impl ExportFormat {
    /// Returns the file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Returns the MIME type of the document.
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Returns the suggested download name for a department's document.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_invoice::export::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::Xlsx.file_name("HQ"), "payroll_summary_HQ.xlsx");
    /// assert_eq!(ExportFormat::Pdf.file_name("Ops/KL"), "invoice_Ops_KL.pdf");
    /// ```
    pub fn file_name(self, department: &str) -> String {
        let stem = match self {
            ExportFormat::Xlsx => "payroll_summary",
            ExportFormat::Docx | ExportFormat::Pdf => "invoice",
        };
        format!("{stem}_{}.{}", sanitize_file_component(department), self.extension())
    }
}

/// Replaces characters that are unsafe in a file name.
fn sanitize_file_component(input: &str) -> String {
    let out: String = input
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | ' ') {
                ch
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = out.trim();
    if trimmed.is_empty() {
        "department".to_string()
    } else {
        trimmed.to_string()
    }
}
