//! Company — the primary record of the directory.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{Rule, RuleSet, Validate};

/// Field rules shared by every company input shape.
///
/// `name`, `address`, `city` and `country` are required non-empty strings;
/// `email` and `phone` are optional, but must be non-empty when given and
/// `email` must parse as an address.
pub static COMPANY_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
  RuleSet::new()
    .field("name", [Rule::required(), Rule::non_empty()])
    .field("address", [Rule::required(), Rule::non_empty()])
    .field("city", [Rule::required(), Rule::non_empty()])
    .field("country", [Rule::required(), Rule::non_empty()])
    .field("email", [Rule::non_empty(), Rule::email()])
    .field("phone", [Rule::non_empty()])
});

/// A stored company row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
  pub id:         i64,
  pub name:       String,
  pub address:    String,
  pub city:       String,
  pub country:    String,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::DirectoryStore::create_company`].
/// `id` and both timestamps are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
  pub name:    String,
  pub address: String,
  pub city:    String,
  pub country: String,
  pub email:   Option<String>,
  pub phone:   Option<String>,
}

impl Validate for NewCompany {
  fn rules() -> &'static RuleSet { &COMPANY_RULES }

  fn field(&self, name: &str) -> Option<&str> {
    match name {
      "name" => Some(&self.name),
      "address" => Some(&self.address),
      "city" => Some(&self.city),
      "country" => Some(&self.country),
      "email" => self.email.as_deref(),
      "phone" => self.phone.as_deref(),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn acme() -> NewCompany {
    NewCompany {
      name:    "Acme".into(),
      address: "1 Road Runner Way".into(),
      city:    "Phoenix".into(),
      country: "US".into(),
      email:   None,
      phone:   None,
    }
  }

  #[test]
  fn minimal_company_is_valid() {
    assert!(acme().validate().is_ok());
  }

  #[test]
  fn empty_required_field_is_rejected() {
    let company = NewCompany { city: String::new(), ..acme() };
    let err = company.validate().unwrap_err();
    assert!(err.has_field("city"));
    assert_eq!(err.len(), 1);
  }

  #[test]
  fn malformed_email_is_rejected() {
    let company = NewCompany { email: Some("not-an-email".into()), ..acme() };
    let err = company.validate().unwrap_err();
    assert!(err.has_field("email"));
  }

  #[test]
  fn valid_email_and_phone_pass() {
    let company = NewCompany {
      email: Some("hello@acme.example".into()),
      phone: Some("+1 555 0100".into()),
      ..acme()
    };
    assert!(company.validate().is_ok());
  }
}
