//! CLI error handling.

use std::io;

use stripe_mock_config::{ConfigError, EnvError};
use thiserror::Error;

use crate::Exit;

/// CLI error type with context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    Server {
        message: String,
        #[source]
        source: Option<stripe_mock_core::Error>,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Server { .. } => "E003",
            Self::Validation { .. } => "E004",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Server { .. } => Exit::ServerError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::Other(_) => Exit::GeneralError,
        }
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Create a config error with hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::NotFound { .. } => Some(format!(
                "pass --fixtures <FILE> or set {}",
                stripe_mock_config::vars::FIXTURES
            )),
            ConfigError::EnvVarNotFound { var } => {
                Some(format!("set {var} or give it a default with ${{{var}:-value}}"))
            }
            _ => None,
        };
        Self::Config {
            message: err.to_string(),
            source: Some(Box::new(err)),
            hint,
        }
    }
}

impl From<EnvError> for CliError {
    fn from(err: EnvError) -> Self {
        Self::Config {
            message: err.to_string(),
            source: Some(Box::new(err)),
            hint: None,
        }
    }
}

impl From<stripe_mock_core::Error> for CliError {
    fn from(err: stripe_mock_core::Error) -> Self {
        use stripe_mock_core::Error as CoreError;

        match err {
            CoreError::Config(message) => Self::Config {
                message,
                source: None,
                hint: None,
            },
            CoreError::Io(source) => Self::Io {
                message: source.to_string(),
                source,
            },
            CoreError::Serialization(source) => Self::Other(source.into()),
            err @ CoreError::Server(_) => Self::Server {
                message: err.to_string(),
                source: Some(err),
            },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_fixture_file_hint() {
        let err: CliError = ConfigError::NotFound {
            path: PathBuf::from("missing.yaml"),
        }
        .into();

        assert_eq!(err.exit_code(), Exit::ConfigError);
        assert_eq!(err.code(), "E001");
        assert!(err.hint().unwrap().contains("--fixtures"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("bad").exit_code(), Exit::ValidationError);
        assert_eq!(
            CliError::io("disk", io::Error::new(io::ErrorKind::Other, "full")).exit_code(),
            Exit::IoError
        );
        let server: CliError = stripe_mock_core::Error::server("bind").into();
        assert_eq!(server.exit_code(), Exit::ServerError);
    }

    #[test]
    fn test_core_errors_keep_their_category() {
        let config: CliError = stripe_mock_core::Error::config("bad fixtures").into();
        assert_eq!(config.exit_code(), Exit::ConfigError);
        assert_eq!(config.to_string(), "bad fixtures");

        let io: CliError =
            stripe_mock_core::Error::from(io::Error::new(io::ErrorKind::NotFound, "gone")).into();
        assert_eq!(io.exit_code(), Exit::IoError);

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let serialization: CliError = stripe_mock_core::Error::from(json).into();
        assert_eq!(serialization.exit_code(), Exit::GeneralError);
        assert_eq!(serialization.code(), "E999");
    }
}
