//! Server settings loading from config.toml
//!
//! Settings come from an optional TOML file and can be overridden by
//! environment variables (usually populated from `.env` by `dotenvy`).
//! A missing file is not an error: every field has a default.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an alternative settings file.
pub const CONFIG_PATH_VAR: &str = "BUDGET_TRACKER_CONFIG";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Socket address the server listens on
    pub bind_address: String,
    /// `SeaORM` connection string
    pub database_url: String,
    /// Identity recorded on expenses when the request carries none
    pub default_added_by: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            default_added_by: None,
        }
    }
}

impl Settings {
    /// Applies `BIND_ADDRESS`, `DATABASE_URL` and `DEFAULT_ADDED_BY` overrides.
    ///
    /// `lookup` abstracts the environment so tests do not have to mutate it.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind_address) = lookup("BIND_ADDRESS") {
            self.bind_address = bind_address;
        }
        if let Some(database_url) = lookup("DATABASE_URL") {
            self.database_url = database_url;
        }
        if let Some(added_by) = lookup("DEFAULT_ADDED_BY").filter(|v| !v.trim().is_empty()) {
            self.default_added_by = Some(added_by);
        }
        self
    }
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })
}

/// Loads settings from a TOML file, falling back to defaults when it does not exist.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::debug!("No settings file at {:?}, using defaults", path_ref);
        return Ok(Settings::default());
    }

    tracing::debug!("Loading settings from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {path_ref:?}: {e}"),
    })?;
    parse_settings(&contents)
}

/// Loads settings from `$BUDGET_TRACKER_CONFIG` (or ./config.toml) and applies
/// environment overrides.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    let settings = load_settings(path)?;
    Ok(settings.with_overrides(|key| std::env::var(key).ok()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            bind_address = "0.0.0.0:9000"
            database_url = "sqlite::memory:"
            default_added_by = "household"
        "#;

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:9000");
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.default_added_by.as_deref(), Some("household"));
    }

    #[test]
    fn test_parse_partial_settings_uses_defaults() {
        let settings = parse_settings(r#"bind_address = "0.0.0.0:9000""#).unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:9000");
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert!(settings.default_added_by.is_none());
    }

    #[test]
    fn test_parse_invalid_settings() {
        let result = parse_settings("bind_address = [");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = load_settings("definitely/not/here.toml").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite::memory:"),
            ("DEFAULT_ADDED_BY", "bob"),
        ]
        .into_iter()
        .collect();

        let settings =
            Settings::default().with_overrides(|key| env.get(key).map(ToString::to_string));
        assert_eq!(settings.bind_address, "127.0.0.1:8000");
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.default_added_by.as_deref(), Some("bob"));
    }

    #[test]
    fn test_blank_default_added_by_is_ignored() {
        let settings = Settings::default().with_overrides(|key| {
            (key == "DEFAULT_ADDED_BY").then(|| "   ".to_string())
        });
        assert!(settings.default_added_by.is_none());
    }
}
