//! Configuration loading and representation.
//!
//! Settings come from the process environment, after an optional `.env` file
//! in the working directory has been merged in (existing variables win).

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::mail::SmtpSettings;
use crate::mail::smtp::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Document store connection string (`MONGO_URI`).
    ///
    /// Absence is not a startup error: the server still listens and every
    /// store-backed route fails.
    pub mongo_uri: Option<String>,
    /// Listen port (`PORT`).
    pub port: u16,
    /// Relay settings; `EMAIL` is also where contact notifications go.
    pub smtp: SmtpSettings,
}

impl Config {
    /// Read the process environment.
    ///
    /// Call [`hydrate_env_file`] first for `.env` values to be seen.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// Values are trimmed; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key).and_then(|value| {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
        };

        let port = match get("PORT") {
            Some(raw) => parse_port("PORT", &raw)?,
            None => DEFAULT_PORT,
        };
        let smtp_port = match get("SMTP_PORT") {
            Some(raw) => parse_port("SMTP_PORT", &raw)?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            mongo_uri: get("MONGO_URI"),
            port,
            smtp: SmtpSettings {
                host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port: smtp_port,
                username: get("EMAIL"),
                password: get("PASSWORD"),
            },
        })
    }

    /// Address contact notifications are delivered to.
    pub fn notify_to(&self) -> Option<&str> {
        self.smtp.username.as_deref()
    }
}

fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.parse::<u16>()
        .map_err(|source| ConfigError::InvalidNumber { key, source })
}

/// Merge `.env` into the process environment; a missing file is fine.
///
/// Returns the path of the file that was loaded. Runs before logging is set
/// up (`.env` may carry `RUST_LOG`), so reporting the path is left to the
/// caller.
pub fn hydrate_env_file() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ConfigError::Dotenv { source: err }),
    }
}

/// Errors emitted when `.env` hydration or environment parsing fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port in `{key}`: {source}")]
    InvalidNumber {
        key: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to load .env file: {source}")]
    Dotenv {
        #[from]
        source: dotenvy::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();

        assert_eq!(cfg.mongo_uri, None);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.smtp, SmtpSettings::default());
        assert_eq!(cfg.notify_to(), None);
    }

    #[test]
    fn reads_every_recognized_variable() {
        let cfg = config(&[
            ("MONGO_URI", "mongodb://localhost:27017/portfolio"),
            ("EMAIL", "owner@example.com"),
            ("PASSWORD", "app-password"),
            ("PORT", "8081"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "587"),
        ])
        .unwrap();

        assert_eq!(cfg.mongo_uri.as_deref(), Some("mongodb://localhost:27017/portfolio"));
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.notify_to(), Some("owner@example.com"));
        assert_eq!(cfg.smtp.password.as_deref(), Some("app-password"));
        assert_eq!(cfg.smtp.host, "smtp.example.com");
        assert_eq!(cfg.smtp.port, 587);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = config(&[("MONGO_URI", "   "), ("PORT", "")]).unwrap();

        assert_eq!(cfg.mongo_uri, None);
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        if !std::path::Path::new(".env").exists() {
            assert!(hydrate_env_file().is_ok());
        }
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "PORT", .. }));
    }
}
