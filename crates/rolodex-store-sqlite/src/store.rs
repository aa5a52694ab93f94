//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use rolodex_core::{
  company::{Company, NewCompany},
  membership::{Member, Membership, NewMembership},
  person::{NewPerson, Person},
  store::{Attachment, DirectoryStore},
  validate::Validate,
};

use crate::{
  encode::{
    COMPANY_COLUMNS, RawCompany, RawMember, RawMembership, RawPerson, encode_dt,
  },
  location::Location,
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolodex directory backed by a single SQLite database.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Outcome of inserting a join row whose parents may be missing.
enum LinkOutcome {
  Linked(i64),
  MissingCompany,
  MissingPerson,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store described by a database URI (see [`Location::parse`]).
  pub async fn connect(uri: &str) -> Result<Self> {
    match Location::parse(uri)? {
      Location::Memory => {
        tracing::warn!("using an in-memory database; data is lost on exit");
        Self::open_in_memory().await
      }
      Location::File(path) => {
        tracing::debug!(path = %path.display(), "opening sqlite database");
        Self::open(path).await
      }
    }
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn query_company(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawCompany>> {
  conn
    .query_row(
      &format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = ?1"),
      rusqlite::params![id],
      RawCompany::from_row,
    )
    .optional()
}

fn query_members(
  conn: &rusqlite::Connection,
  company_id: i64,
) -> rusqlite::Result<Vec<RawMember>> {
  let mut stmt = conn.prepare(
    "SELECT p.id, p.name, p.created_at, p.updated_at, cp.role
     FROM company_person cp
     JOIN people p ON p.id = cp.person_id
     WHERE cp.company_id = ?1
     ORDER BY cp.id",
  )?;
  let rows = stmt
    .query_map(rusqlite::params![company_id], |row| {
      Ok(RawMember {
        person: RawPerson {
          id:         row.get(0)?,
          name:       row.get(1)?,
          created_at: row.get(2)?,
          updated_at: row.get(3)?,
        },
        role:   row.get(4)?,
      })
    })?
    .collect();
  rows
}

fn exists(
  conn: &rusqlite::Connection,
  table: &str,
  id: i64,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        &format!("SELECT 1 FROM {table} WHERE id = ?1"),
        rusqlite::params![id],
        |_| Ok(()),
      )
      .optional()?
      .is_some(),
  )
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  // ── Companies ─────────────────────────────────────────────────────────────

  async fn list_companies(&self) -> Result<Vec<Company>> {
    let raws: Vec<RawCompany> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawCompany::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCompany::into_company).collect()
  }

  async fn create_company(&self, input: NewCompany) -> Result<Company> {
    input.validate()?;

    let now    = Utc::now();
    let at_str = encode_dt(now);
    let row    = input.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO companies (
             name, address, city, country, email, phone, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            row.name,
            row.address,
            row.city,
            row.country,
            row.email,
            row.phone,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Company {
      id,
      name:       input.name,
      address:    input.address,
      city:       input.city,
      country:    input.country,
      email:      input.email,
      phone:      input.phone,
      created_at: now,
      updated_at: now,
    })
  }

  async fn get_company(&self, id: i64) -> Result<Option<Company>> {
    let raw = self
      .conn
      .call(move |conn| Ok(query_company(conn, id)?))
      .await?;

    raw.map(RawCompany::into_company).transpose()
  }

  async fn get_company_with_people(
    &self,
    id: i64,
  ) -> Result<Option<(Company, Vec<Member>)>> {
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(company) = query_company(&tx, id)? else {
          return Ok(None);
        };
        let members = query_members(&tx, id)?;
        tx.commit()?;
        Ok(Some((company, members)))
      })
      .await?;

    let Some((company, members)) = raw else {
      return Ok(None);
    };

    let company = company.into_company()?;
    let members = members
      .into_iter()
      .map(RawMember::into_member)
      .collect::<Result<Vec<_>>>()?;

    Ok(Some((company, members)))
  }

  // ── People ────────────────────────────────────────────────────────────────

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    input.validate()?;

    let now    = Utc::now();
    let at_str = encode_dt(now);
    let name   = input.name.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
          rusqlite::params![name, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Person {
      id,
      name:       input.name,
      created_at: now,
      updated_at: now,
    })
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, name, created_at, updated_at FROM people WHERE id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(RawPerson {
                id:         row.get(0)?,
                name:       row.get(1)?,
                created_at: row.get(2)?,
                updated_at: row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  // ── Memberships ───────────────────────────────────────────────────────────

  async fn add_membership(&self, input: NewMembership) -> Result<Membership> {
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let NewMembership { company_id, person_id, role } = input;
    let role_param = role.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !exists(&tx, "companies", company_id)? {
          return Ok(LinkOutcome::MissingCompany);
        }
        if !exists(&tx, "people", person_id)? {
          return Ok(LinkOutcome::MissingPerson);
        }
        tx.execute(
          "INSERT INTO company_person (company_id, person_id, role, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![company_id, person_id, role_param, at_str],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(LinkOutcome::Linked(id))
      })
      .await?;

    match outcome {
      LinkOutcome::Linked(id) => Ok(Membership {
        id,
        company_id,
        person_id,
        role,
        created_at: now,
      }),
      LinkOutcome::MissingCompany => {
        Err(rolodex_core::Error::CompanyNotFound(company_id).into())
      }
      LinkOutcome::MissingPerson => {
        Err(rolodex_core::Error::PersonNotFound(person_id).into())
      }
    }
  }

  async fn list_memberships(&self, company_id: i64) -> Result<Vec<Membership>> {
    let raws: Vec<RawMembership> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, company_id, person_id, role, created_at
           FROM company_person
           WHERE company_id = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![company_id], |row| {
            Ok(RawMembership {
              id:         row.get(0)?,
              company_id: row.get(1)?,
              person_id:  row.get(2)?,
              role:       row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMembership::into_membership).collect()
  }

  async fn remove_membership(&self, id: i64) -> Result<bool> {
    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM company_person WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn attach_new_person(
    &self,
    company_id: i64,
    person:     NewPerson,
    role:       Option<String>,
  ) -> Result<Option<Attachment>> {
    person.validate()?;

    let now        = Utc::now();
    let at_str     = encode_dt(now);
    let name       = person.name.clone();
    let role_param = role.clone();

    // Person and link are written together; a missing company rolls back
    // both.
    let ids: Option<(i64, i64)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !exists(&tx, "companies", company_id)? {
          return Ok(None);
        }
        tx.execute(
          "INSERT INTO people (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
          rusqlite::params![name, at_str],
        )?;
        let person_id = tx.last_insert_rowid();
        tx.execute(
          "INSERT INTO company_person (company_id, person_id, role, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![company_id, person_id, role_param, at_str],
        )?;
        let membership_id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Some((person_id, membership_id)))
      })
      .await?;

    Ok(ids.map(|(person_id, membership_id)| Attachment {
      person:     Person {
        id:         person_id,
        name:       person.name,
        created_at: now,
        updated_at: now,
      },
      membership: Membership {
        id: membership_id,
        company_id,
        person_id,
        role,
        created_at: now,
      },
    }))
  }
}
