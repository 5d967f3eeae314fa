//! Configuration types for payroll processing and invoicing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every structure has a
//! `Default` carrying the built-in column layout and rates, so a YAML file
//! only needs to name what it overrides.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Rates and presentation settings for the department invoice.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InvoiceSettings {
    /// Currency prefix printed before monetary totals (e.g., "RM").
    pub currency: String,
    /// Label of the sales tax (e.g., "SST").
    pub tax_label: String,
    /// Flat tax rate applied to the invoice subtotal.
    pub tax_rate: Decimal,
    /// Management fee rate applied to wages, overtime, statutory and HRDF.
    pub management_fee_rate: Decimal,
    /// Insurance claim billed per employee.
    pub insurance_fee_per_head: Decimal,
    /// Cell text that marks the header row of a payroll sheet.
    pub header_marker: String,
    /// Largest accepted workbook upload in bytes.
    pub max_upload_bytes: usize,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            currency: "RM".to_string(),
            tax_label: "SST".to_string(),
            tax_rate: Decimal::new(8, 2),
            management_fee_rate: Decimal::new(15, 2),
            insurance_fee_per_head: Decimal::new(50, 0),
            header_marker: "No.".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// A canonical field together with the header spellings that identify it.
///
/// Aliases are tried in order; the first one matching a header wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasGroup {
    /// The canonical name of the field.
    pub name: String,
    /// Acceptable header spellings, in priority order.
    pub aliases: Vec<String>,
}

impl AliasGroup {
    /// Creates an alias group from string slices.
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Column layout of the payroll export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Header of the employee name column.
    pub name: String,
    /// Header of the employee number column.
    pub employee_number: String,
    /// Header of the join date column.
    pub joined: String,
    /// Header of the resignation date column.
    pub resign: String,
    /// Spellings of the cost-center column, in priority order.
    pub cost_center: AliasGroup,
    /// Exact header renames applied after cleaning (e.g., "EPFEE" to "EPF").
    pub header_renames: HashMap<String, String>,
    /// Earning columns summed into Gross Pay.
    pub earnings: Vec<String>,
    /// Employee-side statutory columns summed into Total Deduction.
    pub deductions: Vec<String>,
    /// Overtime columns removed from wages and billed as overtime.
    pub overtime: Vec<String>,
    /// Header of the HRDF levy column.
    pub hrdf: String,
    /// Employer-side statutory contributions, each matched by alias.
    pub employer_statutory: Vec<AliasGroup>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        let header_renames = [("EPFEE", "EPF"), ("SocEE", "Socso"), ("EISEE", "EIS")]
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();

        let earnings = [
            "M/Basic", "OT Amt 1½", "MEC", "ALL", "OVT", "MS", "NS", "ICP", "BAC", "BSC", "BBB",
            "BAL", "BOT", "CSN",
        ];

        Self {
            name: "Name".to_string(),
            employee_number: "Emp No".to_string(),
            joined: "Joined".to_string(),
            resign: "Resign".to_string(),
            cost_center: AliasGroup::new(
                "Cost Center",
                &["C/Center", "Cost Center", "Center", "C Center", "C-Center"],
            ),
            header_renames,
            earnings: earnings.iter().map(|c| c.to_string()).collect(),
            deductions: ["EPF", "Socso", "EIS", "PCB"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            overtime: vec!["OT Amt 1½".to_string(), "BOT".to_string()],
            hrdf: "HRDF".to_string(),
            employer_statutory: vec![
                AliasGroup::new("EPF ER", &["EPF ER", "EPF'ER", "EPFER"]),
                AliasGroup::new("EIS ER", &["EIS ER", "EIS'ER", "EISER"]),
                // "Soc 'EE" is an employee-side spelling kept for sheets that label
                // the employer Socso column that way.
                AliasGroup::new(
                    "Socso ER",
                    &["Socso ER", "SOC ER", "SOC'ER", "SOCSOER", "Soc 'EE"],
                ),
            ],
        }
    }
}

impl ColumnConfig {
    /// Returns true if the header holds identity or date data rather than an amount.
    pub fn is_identity_column(&self, header: &str, cost_center_column: &str) -> bool {
        header == self.name
            || header == self.employee_number
            || header == self.joined
            || header == self.resign
            || header == cost_center_column
    }
}

/// The static username/password allow-list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersConfig {
    /// Map of username to password.
    #[serde(default)]
    pub users: HashMap<String, String>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct PayrollConfig {
    /// Invoice rates and presentation settings.
    settings: InvoiceSettings,
    /// Column layout of the payroll export.
    columns: ColumnConfig,
    /// The access allow-list.
    users: UsersConfig,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(settings: InvoiceSettings, columns: ColumnConfig, users: UsersConfig) -> Self {
        Self {
            settings,
            columns,
            users,
        }
    }

    /// Returns the invoice settings.
    pub fn settings(&self) -> &InvoiceSettings {
        &self.settings
    }

    /// Returns the column layout.
    pub fn columns(&self) -> &ColumnConfig {
        &self.columns
    }

    /// Returns the allow-list.
    pub fn users(&self) -> &UsersConfig {
        &self.users
    }
}
