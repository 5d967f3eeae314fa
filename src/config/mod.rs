//! Configuration loading and management for the payroll invoice engine.
//!
//! This module loads the invoice rates, the payroll column layout and the
//! access allow-list from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_invoice::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Currency: {}", config.settings().currency);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AliasGroup, ColumnConfig, InvoiceSettings, PayrollConfig, UsersConfig};
