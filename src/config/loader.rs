//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{InvoiceError, InvoiceResult};

use super::types::{ColumnConfig, InvoiceSettings, PayrollConfig, UsersConfig};

/// Loads and provides access to the payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── invoice.yaml   # Rates, currency, header marker, upload limit
/// ├── columns.yaml   # Column aliases, earnings and deductions
/// └── users.yaml     # Username/password allow-list
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_invoice::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll")?;
/// println!("Tax rate: {}", loader.settings().tax_rate);
/// # Ok::<(), payroll_invoice::error::InvoiceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any of the three files is missing or is not valid YAML
    /// for its structure.
    pub fn load<P: AsRef<Path>>(path: P) -> InvoiceResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<InvoiceSettings>(&path.join("invoice.yaml"))?;
        let columns = Self::load_yaml::<ColumnConfig>(&path.join("columns.yaml"))?;
        let users = Self::load_yaml::<UsersConfig>(&path.join("users.yaml"))?;

        Ok(Self {
            config: PayrollConfig::new(settings, columns, users),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> InvoiceResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| InvoiceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| InvoiceError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the invoice settings.
    pub fn settings(&self) -> &InvoiceSettings {
        self.config.settings()
    }

    /// Returns the column layout.
    pub fn columns(&self) -> &ColumnConfig {
        self.config.columns()
    }

    /// Returns the allow-list.
    pub fn users(&self) -> &UsersConfig {
        self.config.users()
    }
}
