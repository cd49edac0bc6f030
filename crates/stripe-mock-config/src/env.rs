//! Environment variable handling.

use crate::types::ServerSettings;
use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Environment variable names.
pub mod vars {
    pub const FIXTURES: &str = "STRIPE_MOCK_FIXTURES";
    pub const HOST: &str = "STRIPE_MOCK_HOST";
    pub const PORT: &str = "STRIPE_MOCK_PORT";
}

/// Access to the process environment.
pub struct Environment;

impl Environment {
    /// Load `.env.local` and `.env` if present.
    ///
    /// Variables already set are never overridden, so `.env.local` wins over
    /// `.env` and the process environment wins over both.
    pub fn init() {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }

    /// Get an integer variable.
    pub fn get_int<T: std::str::FromStr>(var: &str) -> Result<Option<T>, EnvError> {
        match env::var(var) {
            Ok(v) => v.parse().map(Some).map_err(|_| EnvError::InvalidValue {
                var: var.to_string(),
                message: "expected integer".to_string(),
            }),
            Err(_) => Ok(None),
        }
    }

    /// Override `settings` with `STRIPE_MOCK_HOST` / `STRIPE_MOCK_PORT`.
    pub fn apply_server_overrides(settings: &mut ServerSettings) -> Result<(), EnvError> {
        if let Some(host) = Self::get(vars::HOST) {
            settings.host = host;
        }
        if let Some(port) = Self::get_int::<u16>(vars::PORT)? {
            settings.port = port;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing() {
        assert_eq!(Environment::get("STRIPE_MOCK_NONEXISTENT_VAR_12345"), None);
    }

    #[test]
    fn test_int_parsing() {
        env::set_var("STRIPE_MOCK_TEST_INT", "42");
        assert_eq!(Environment::get_int::<u16>("STRIPE_MOCK_TEST_INT").unwrap(), Some(42));
        env::set_var("STRIPE_MOCK_TEST_INT", "forty-two");
        assert!(Environment::get_int::<u16>("STRIPE_MOCK_TEST_INT").is_err());
        env::remove_var("STRIPE_MOCK_TEST_INT");
        assert_eq!(Environment::get_int::<u16>("STRIPE_MOCK_TEST_INT").unwrap(), None);
    }

    #[test]
    fn test_server_overrides() {
        env::set_var(vars::HOST, "0.0.0.0");
        env::set_var(vars::PORT, "4242");

        let mut settings = ServerSettings::default();
        Environment::apply_server_overrides(&mut settings).unwrap();
        assert_eq!(settings.address(), "0.0.0.0:4242");

        env::remove_var(vars::HOST);
        env::remove_var(vars::PORT);
    }
}
