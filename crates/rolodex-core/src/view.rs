//! Response shapes.
//!
//! [`CompanyView`] is the external JSON form of a single company: the stored
//! attributes minus timestamps, plus its people with the join-row role
//! flattened onto each entry.

use serde::{Deserialize, Serialize};

use crate::{company::Company, membership::Member};

/// One person entry inside a [`CompanyView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
  pub id:   i64,
  pub name: String,
  pub role: Option<String>,
}

impl From<Member> for PersonView {
  fn from(m: Member) -> Self {
    Self {
      id:   m.person.id,
      name: m.person.name,
      role: m.role,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyView {
  pub id:      i64,
  pub name:    String,
  pub address: String,
  pub city:    String,
  pub country: String,
  pub email:   Option<String>,
  pub phone:   Option<String>,
  pub people:  Vec<PersonView>,
}

impl CompanyView {
  /// Shape `company` and its related `members` into the response form.
  pub fn new(company: Company, members: Vec<Member>) -> Self {
    Self {
      id:      company.id,
      name:    company.name,
      address: company.address,
      city:    company.city,
      country: company.country,
      email:   company.email,
      phone:   company.phone,
      people:  members.into_iter().map(PersonView::from).collect(),
    }
  }
}
