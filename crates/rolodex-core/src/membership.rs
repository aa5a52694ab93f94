//! Membership — the `company_person` join row linking one person to one
//! company, with an optional role.
//!
//! Memberships are a first-class entity rather than an implicit side table:
//! they are created, listed and deleted through the store like any other
//! record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::person::Person;

/// A stored join row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
  pub id:         i64,
  pub company_id: i64,
  pub person_id:  i64,
  /// The person's role at the company; unset when attached without one.
  pub role:       Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::DirectoryStore::add_membership`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
  pub company_id: i64,
  pub person_id:  i64,
  pub role:       Option<String>,
}

/// A person as seen from a company: the person row plus the role carried on
/// the join row that links them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
  pub person: Person,
  pub role:   Option<String>,
}
