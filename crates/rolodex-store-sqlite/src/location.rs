//! Parsing of the `DATABASE_URI` setting into a SQLite location.

use std::path::PathBuf;

use crate::{Error, Result};

/// Where a [`crate::SqliteStore`] keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Memory,
  File(PathBuf),
}

impl Location {
  /// Accepts a bare path, `sqlite://<path>`, `sqlite:<path>`, `:memory:` or
  /// `sqlite::memory:`. Any other `scheme://` is rejected.
  pub fn parse(uri: &str) -> Result<Self> {
    let uri = uri.trim();
    let rest = if let Some(rest) = uri.strip_prefix("sqlite://") {
      rest
    } else if let Some(rest) = uri.strip_prefix("sqlite:") {
      rest
    } else if uri.contains("://") {
      return Err(Error::UnsupportedUri(uri.to_owned()));
    } else {
      uri
    };

    match rest {
      "" => Err(Error::UnsupportedUri(uri.to_owned())),
      ":memory:" => Ok(Self::Memory),
      path => Ok(Self::File(PathBuf::from(path))),
    }
  }
}
