//! Static allow-list access gate.
//!
//! Every request carries `x-username` and `x-password` headers that must
//! match an entry of the configured allow-list exactly. There are no
//! sessions and no password hashing.

use std::collections::HashMap;

use axum::http::HeaderMap;

use crate::config::UsersConfig;
use crate::error::{InvoiceError, InvoiceResult};

/// Header carrying the username.
pub const USERNAME_HEADER: &str = "x-username";
/// Header carrying the password.
pub const PASSWORD_HEADER: &str = "x-password";

/// Checks username/password pairs against the allow-list.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    users: HashMap<String, String>,
}

impl AccessGate {
    /// Creates a gate from the configured users.
    pub fn new(users: &UsersConfig) -> Self {
        Self {
            users: users.users.clone(),
        }
    }

    /// Succeeds only when the username exists and the password matches exactly.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use payroll_invoice::api::AccessGate;
    /// use payroll_invoice::config::UsersConfig;
    ///
    /// let users = UsersConfig {
    ///     users: HashMap::from([("alice".to_string(), "wonderland123".to_string())]),
    /// };
    /// let gate = AccessGate::new(&users);
    /// assert!(gate.verify("alice", "wonderland123").is_ok());
    /// assert!(gate.verify("alice", "Wonderland123").is_err());
    /// ```
    pub fn verify(&self, username: &str, password: &str) -> InvoiceResult<()> {
        match self.users.get(username) {
            Some(expected) if expected == password => Ok(()),
            _ => Err(InvoiceError::Unauthorized),
        }
    }

    /// Verifies the credentials carried in request headers.
    ///
    /// Missing or non-UTF-8 headers are treated as wrong credentials.
    pub fn verify_headers(&self, headers: &HeaderMap) -> InvoiceResult<String> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        match (header(USERNAME_HEADER), header(PASSWORD_HEADER)) {
            (Some(username), Some(password)) => {
                self.verify(username, password)?;
                Ok(username.to_string())
            }
            _ => Err(InvoiceError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> AccessGate {
        AccessGate::new(&UsersConfig {
            users: HashMap::from([
                ("alice".to_string(), "wonderland123".to_string()),
                ("bob".to_string(), "builder456".to_string()),
            ]),
        })
    }

    #[test]
    fn test_verify_exact_pair() {
        let gate = gate();
        assert!(gate.verify("alice", "wonderland123").is_ok());
        assert!(gate.verify("bob", "builder456").is_ok());
        assert!(matches!(
            gate.verify("alice", "builder456"),
            Err(InvoiceError::Unauthorized)
        ));
        assert!(gate.verify("carol", "").is_err());
        assert!(gate.verify("Alice", "wonderland123").is_err());
    }

    #[test]
    fn test_verify_headers() {
        let gate = gate();
        let mut headers = HeaderMap::new();
        assert!(gate.verify_headers(&headers).is_err());

        headers.insert(USERNAME_HEADER, HeaderValue::from_static("bob"));
        assert!(gate.verify_headers(&headers).is_err());

        headers.insert(PASSWORD_HEADER, HeaderValue::from_static("builder456"));
        assert_eq!(gate.verify_headers(&headers).unwrap(), "bob");
    }
}
