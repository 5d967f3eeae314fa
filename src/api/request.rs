//! Query parameters accepted by the payroll invoice API.
//!
//! Every endpoint takes the workbook bytes as the request body; the sheet
//! and department selections travel in the query string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ProcessingRequest;

/// Selects a sheet of the uploaded workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetQuery {
    /// The sheet name.
    pub sheet: String,
}

/// Selects a sheet and a department of the uploaded workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentQuery {
    /// The sheet name.
    pub sheet: String,
    /// The cost-center value to bill.
    pub department: String,
    /// Invoice date; defaults to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl From<DepartmentQuery> for ProcessingRequest {
    fn from(query: DepartmentQuery) -> Self {
        ProcessingRequest::new(query.sheet, query.department)
    }
}
