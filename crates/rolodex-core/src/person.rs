//! Person — created only while attaching to a company.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{Rule, RuleSet, Validate};

pub static PERSON_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
  RuleSet::new().field("name", [Rule::required(), Rule::non_empty()])
});

/// A stored person row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:         i64,
  pub name:       String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::DirectoryStore::create_person`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub name: String,
}

impl NewPerson {
  pub fn new(name: impl Into<String>) -> Self { Self { name: name.into() } }
}

impl Validate for NewPerson {
  fn rules() -> &'static RuleSet { &PERSON_RULES }

  fn field(&self, name: &str) -> Option<&str> {
    match name {
      "name" => Some(&self.name),
      _ => None,
    }
  }
}
