//! Fixture file loading and parsing.

use crate::types::Fixtures;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

static ENV_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("valid env var pattern"));

/// Characters the mock's URL patterns accept in an id.
static ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid id pattern"));

/// Fixture loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("fixture file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read fixtures: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

impl From<ConfigError> for stripe_mock_core::Error {
    fn from(err: ConfigError) -> Self {
        stripe_mock_core::Error::config(err.to_string())
    }
}

/// Loads fixture files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoader;

impl FixtureLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load fixtures from a YAML file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Fixtures, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        self.parse(&contents)
    }

    /// Load fixtures from `path`, or return empty fixtures when no path is given.
    pub fn load_or_default(&self, path: Option<&Path>) -> Result<Fixtures, ConfigError> {
        match path {
            Some(path) => self.load(path),
            None => Ok(Fixtures::default()),
        }
    }

    /// Parse fixtures from YAML text, expanding environment variables first.
    pub fn parse(&self, contents: &str) -> Result<Fixtures, ConfigError> {
        let expanded = self.expand_env_vars(contents)?;

        let fixtures: Fixtures =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&fixtures)?;
        Ok(fixtures)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR_RE.captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Ids must be usable as a URL path segment; the host must be set.
    fn validate(&self, fixtures: &Fixtures) -> Result<(), ConfigError> {
        if fixtures.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "server.host must not be empty".to_string(),
            });
        }

        let top_level = [
            ("customers", fixtures.customers.keys().collect::<Vec<_>>()),
            ("plans", fixtures.plans.keys().collect()),
            ("coupons", fixtures.coupons.keys().collect()),
        ];
        for (collection, ids) in top_level {
            for id in ids {
                check_id(collection, id)?;
            }
        }

        for (customer_id, subscriptions) in &fixtures.subscriptions {
            check_id("subscriptions", customer_id)?;
            for id in subscriptions.keys() {
                check_id("subscriptions", id)?;
            }
        }

        for (customer_id, sources) in &fixtures.sources {
            check_id("sources", customer_id)?;
            for id in sources.keys() {
                check_id("sources", id)?;
            }
        }

        Ok(())
    }

    /// Save fixtures to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>, fixtures: &Fixtures) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(fixtures).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(path, yaml)?;
        Ok(())
    }
}

fn check_id(collection: &str, id: &str) -> Result<(), ConfigError> {
    if ID_RE.is_match(id) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: format!("{}: invalid id {:?}", collection, id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceFixture;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = FixtureLoader::new().load(dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let fixtures = FixtureLoader::new().load_or_default(None).unwrap();
        assert_eq!(fixtures.object_count(), 0);
        assert_eq!(fixtures.server.port, crate::DEFAULT_PORT);
    }

    #[test]
    fn test_load_fixtures_from_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixtures.yaml");
        fs::write(
            &path,
            r#"
server:
  port: 0
customers:
  cus_1:
    email: one@example.com
  cus_2: {}
plans:
  gold:
    amount: 2000
sources:
  cus_1:
    card_1:
      object: card
      last4: "1881"
"#,
        )
        .unwrap();

        let fixtures = FixtureLoader::new().load(&path).unwrap();

        assert_eq!(fixtures.server.port, 0);
        assert_eq!(fixtures.server.host, "127.0.0.1");
        let ids: Vec<_> = fixtures.customers.keys().cloned().collect();
        assert_eq!(ids, vec!["cus_1".to_string(), "cus_2".to_string()]);
        assert_eq!(
            fixtures.customers["cus_1"].email.as_ref().and_then(|e| e.as_deref()),
            Some("one@example.com")
        );
        assert_eq!(fixtures.plans["gold"].amount, Some(2000));
        assert!(matches!(
            fixtures.sources["cus_1"]["card_1"],
            SourceFixture::Card(_)
        ));
    }

    #[test]
    fn test_env_var_default() {
        let loader = FixtureLoader::new();
        let result = loader
            .expand_env_vars("email: ${STRIPE_MOCK_TEST_NONEXISTENT:-default@example.com}")
            .unwrap();
        assert_eq!(result, "email: default@example.com");
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("STRIPE_MOCK_TEST_EMAIL", "env@example.com");
        let fixtures = FixtureLoader::new()
            .parse("customers:\n  cus_1:\n    email: ${STRIPE_MOCK_TEST_EMAIL}\n")
            .unwrap();
        assert_eq!(
            fixtures.customers["cus_1"].email.as_ref().and_then(|e| e.as_deref()),
            Some("env@example.com")
        );
        std::env::remove_var("STRIPE_MOCK_TEST_EMAIL");
    }

    #[test]
    fn test_env_var_missing_error() {
        let result = FixtureLoader::new().parse("customers:\n  ${STRIPE_MOCK_TEST_MISSING}: {}\n");
        match result {
            Err(ConfigError::EnvVarNotFound { var }) => {
                assert_eq!(var, "STRIPE_MOCK_TEST_MISSING")
            }
            other => panic!("Expected EnvVarNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let result = FixtureLoader::new().parse("customers:\n  cus_1:\n    emial: x\n");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let result = FixtureLoader::new().parse("customers:\n  cus_1: [unclosed\n");
        match result {
            Err(ConfigError::ParseError { line, .. }) => assert!(line.is_some()),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_id_rejected() {
        let result = FixtureLoader::new().parse("plans:\n  \"gold plan\": {}\n");
        match result {
            Err(ConfigError::ValidationError { message }) => assert!(message.contains("plans")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_host_rejected() {
        let result = FixtureLoader::new().parse("server:\n  host: ''\n");
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/fixtures.yaml");
        let loader = FixtureLoader::new();

        let original = loader
            .parse("plans:\n  gold:\n    amount: 2000\ncoupons:\n  half: { percent_off: 50 }\n")
            .unwrap();
        loader.save(&path, &original).unwrap();

        let reloaded = loader.load(&path).unwrap();
        assert_eq!(reloaded, original);
    }
}
