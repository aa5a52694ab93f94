//! Runtime server configuration.
//!
//! Layered with the `config` crate, lowest priority first: built-in defaults,
//! an optional TOML file, `ROLODEX_*` environment variables, and finally the
//! bare `PORT` and `DATABASE_URI` variables.

use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URI: &str = "rolodex.db";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// Passed to [`rolodex_store_sqlite::SqliteStore::connect`].
  pub database_uri: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         DEFAULT_HOST.to_owned(),
      port:         DEFAULT_PORT,
      database_uri: DEFAULT_DATABASE_URI.to_owned(),
    }
  }
}

impl ServerConfig {
  /// Load from `file` (if it exists) and the process environment.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with(file, |key| std::env::var(key).ok())
  }

  /// As [`ServerConfig::load`], with the `PORT` / `DATABASE_URI` lookup
  /// supplied by the caller.
  pub fn load_with(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("database_uri", DEFAULT_DATABASE_URI)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("ROLODEX"))
      .set_override_option("port", env("PORT"))?
      .set_override_option("database_uri", env("DATABASE_URI"))?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  fn missing_file() -> PathBuf { PathBuf::from("/nonexistent/rolodex.toml") }

  #[test]
  fn defaults_apply_without_file_or_env() {
    let cfg = ServerConfig::load_with(&missing_file(), |_| None).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.database_uri, DEFAULT_DATABASE_URI);
  }

  #[test]
  fn port_and_database_uri_from_env() {
    let cfg = ServerConfig::load_with(&missing_file(), |key| match key {
      "PORT" => Some("8080".to_owned()),
      "DATABASE_URI" => Some("sqlite::memory:".to_owned()),
      _ => None,
    })
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.database_uri, "sqlite::memory:");
  }

  #[test]
  fn non_numeric_port_is_an_error() {
    let result = ServerConfig::load_with(&missing_file(), |key| {
      (key == "PORT").then(|| "eighty".to_owned())
    });
    assert!(result.is_err());
  }
}
