//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Identifiers are SQLite
//! integer rowids.

use chrono::{DateTime, Utc};
use rolodex_core::{
  company::Company,
  membership::{Member, Membership},
  person::Person,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const COMPANY_COLUMNS: &str =
  "id, name, address, city, country, email, phone, created_at, updated_at";

/// Raw values read directly from a `companies` row.
pub struct RawCompany {
  pub id:         i64,
  pub name:       String,
  pub address:    String,
  pub city:       String,
  pub country:    String,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawCompany {
  /// Map a row selected with [`COMPANY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      address:    row.get(2)?,
      city:       row.get(3)?,
      country:    row.get(4)?,
      email:      row.get(5)?,
      phone:      row.get(6)?,
      created_at: row.get(7)?,
      updated_at: row.get(8)?,
    })
  }

  pub fn into_company(self) -> Result<Company> {
    Ok(Company {
      id:         self.id,
      name:       self.name,
      address:    self.address,
      city:       self.city,
      country:    self.country,
      email:      self.email,
      phone:      self.phone,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub id:         i64,
  pub name:       String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         self.id,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `company_person` row.
pub struct RawMembership {
  pub id:         i64,
  pub company_id: i64,
  pub person_id:  i64,
  pub role:       Option<String>,
  pub created_at: String,
}

impl RawMembership {
  pub fn into_membership(self) -> Result<Membership> {
    Ok(Membership {
      id:         self.id,
      company_id: self.company_id,
      person_id:  self.person_id,
      role:       self.role,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// A `people` row joined with the `role` column of its `company_person` row.
pub struct RawMember {
  pub person: RawPerson,
  pub role:   Option<String>,
}

impl RawMember {
  pub fn into_member(self) -> Result<Member> {
    Ok(Member {
      person: self.person.into_person()?,
      role:   self.role,
    })
  }
}
