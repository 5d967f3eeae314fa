//! HTTP API module for the payroll invoice engine.
//!
//! This module provides the REST endpoints that list sheets and
//! departments, return the department payroll summary and invoice, and
//! export them as documents.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::{AccessGate, PASSWORD_HEADER, USERNAME_HEADER};
pub use handlers::create_router;
pub use request::{DepartmentQuery, SheetQuery};
pub use response::{ApiError, ApiErrorResponse, SheetsResponse};
pub use state::AppState;
