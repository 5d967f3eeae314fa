//! Application state for the payroll invoice API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

use super::auth::AccessGate;

/// Shared application state.
///
/// Holds the loaded configuration and the access gate built from its
/// allow-list. Both are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// The username/password gate.
    gate: Arc<AccessGate>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let gate = AccessGate::new(config.users());
        Self {
            config: Arc::new(config),
            gate: Arc::new(gate),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the access gate.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }
}
