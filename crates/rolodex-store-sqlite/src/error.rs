//! Error type for `rolodex-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rolodex_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unsupported database uri: {0:?}")]
  UnsupportedUri(String),
}

impl From<rolodex_core::validate::Violations> for Error {
  fn from(v: rolodex_core::validate::Violations) -> Self {
    Self::Core(rolodex_core::Error::Validation(v))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
