//! Error types for `rolodex-core`.

use thiserror::Error;

use crate::validate::Violations;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(#[from] Violations),

  #[error("company not found: {0}")]
  CompanyNotFound(i64),

  #[error("person not found: {0}")]
  PersonNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
