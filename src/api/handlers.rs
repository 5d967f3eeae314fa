//! HTTP request handlers for the payroll invoice API.
//!
//! Every endpoint takes the uploaded workbook as the raw request body and
//! the credentials in the `x-username` / `x-password` headers.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{DepartmentReport, departments, process, read_sheet};
use crate::error::{InvoiceError, InvoiceResult};
use crate::export::{ExportFormat, render_invoice_docx, render_invoice_pdf, render_summary_xlsx};
use crate::ingest::Workbook;
use crate::models::ProcessingRequest;

use super::request::{DepartmentQuery, SheetQuery};
use super::response::{ApiError, ApiErrorResponse, SheetsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config().settings().max_upload_bytes;

    Router::new()
        .route("/sheets", post(sheets_handler))
        .route("/departments", post(departments_handler))
        .route("/summary", post(summary_handler))
        .route("/invoice", post(invoice_handler))
        .route("/export/xlsx", post(export_xlsx_handler))
        .route("/export/docx", post(export_docx_handler))
        .route("/export/pdf", post(export_pdf_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Handler for POST /sheets.
///
/// Lists the sheet names of the uploaded workbook.
async fn sheets_handler(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, bytes = body.len(), "Listing sheets");

    let result = state.gate().verify_headers(&headers).and_then(|username| {
        let workbook = Workbook::from_bytes(body.to_vec())?;
        info!(correlation_id = %correlation_id, username = %username, sheets = workbook.sheet_names().len(), "Workbook opened");
        Ok(SheetsResponse {
            sheets: workbook.sheet_names().to_vec(),
        })
    });

    match result {
        Ok(response) => json_response(response),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /departments?sheet=S.
///
/// Resolves the cost-center column of the sheet and lists its departments.
async fn departments_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<SheetQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, sheet = %query.sheet, "Listing departments");

    let result = state.gate().verify_headers(&headers).and_then(|_| {
        let mut workbook = Workbook::from_bytes(body.to_vec())?;
        let config = state.config().config();
        let table = read_sheet(&mut workbook, &query.sheet, config)?;
        departments(&table, config)
    });

    match result {
        Ok(listing) => {
            info!(
                correlation_id = %correlation_id,
                cost_center = %listing.cost_center_column,
                departments = listing.departments.len(),
                "Departments listed"
            );
            json_response(listing)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /summary?sheet=S&department=D.
///
/// Returns the aggregated payroll of the department.
async fn summary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DepartmentQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match department_report(&state, &headers, query, body, correlation_id) {
        Ok(report) => json_response(report.payroll),
        Err(response) => response,
    }
}

/// Handler for POST /invoice?sheet=S&department=D.
///
/// Returns the department invoice.
async fn invoice_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DepartmentQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match department_report(&state, &headers, query, body, correlation_id) {
        Ok(report) => json_response(report.invoice),
        Err(response) => response,
    }
}

/// Handler for POST /export/xlsx?sheet=S&department=D.
async fn export_xlsx_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DepartmentQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    export(ExportFormat::Xlsx, &state, &headers, query, body)
}

/// Handler for POST /export/docx?sheet=S&department=D.
async fn export_docx_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DepartmentQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    export(ExportFormat::Docx, &state, &headers, query, body)
}

/// Handler for POST /export/pdf?sheet=S&department=D.
async fn export_pdf_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DepartmentQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    export(ExportFormat::Pdf, &state, &headers, query, body)
}

/// Renders one document for the department and returns it as an attachment.
fn export(
    format: ExportFormat,
    state: &AppState,
    headers: &HeaderMap,
    query: Result<Query<DepartmentQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let report = match department_report(state, headers, query, body, correlation_id) {
        Ok(report) => report,
        Err(response) => return response,
    };

    let rendered = match format {
        ExportFormat::Xlsx => render_summary_xlsx(&report.payroll),
        ExportFormat::Docx => render_invoice_docx(&report.invoice),
        ExportFormat::Pdf => render_invoice_pdf(&report.invoice),
    };

    match rendered {
        Ok(bytes) => {
            let file_name = format.file_name(&report.invoice.department);
            info!(
                correlation_id = %correlation_id,
                format = format.extension(),
                file_name = %file_name,
                bytes = bytes.len(),
                "Document exported"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, format.content_type().to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{file_name}\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Authenticates, reads the workbook and runs the pipeline for a department.
fn department_report(
    state: &AppState,
    headers: &HeaderMap,
    query: Result<Query<DepartmentQuery>, QueryRejection>,
    body: Bytes,
    correlation_id: Uuid,
) -> Result<DepartmentReport, Response> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return Err(query_rejection(correlation_id, rejection)),
    };
    info!(
        correlation_id = %correlation_id,
        sheet = %query.sheet,
        department = %query.department,
        "Processing department request"
    );

    let start_time = Instant::now();
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let request: ProcessingRequest = query.into();

    let result: InvoiceResult<DepartmentReport> =
        state.gate().verify_headers(headers).and_then(|_| {
            let mut workbook = Workbook::from_bytes(body.to_vec())?;
            process(&mut workbook, &request, state.config().config(), date)
        });

    match result {
        Ok(report) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                department = %request.department,
                headcount = report.invoice.headcount,
                total_incl_tax = %report.invoice.totals.total_incl_tax,
                duration_us = duration.as_micros(),
                "Department processed successfully"
            );
            Ok(report)
        }
        Err(err) => Err(error_response(correlation_id, err)),
    }
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: InvoiceError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid query string"
    );
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiError::invalid_query(body_text)),
    )
        .into_response()
}
