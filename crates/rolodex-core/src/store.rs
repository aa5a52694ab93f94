//! The `DirectoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! The API layer depends on this abstraction and receives a concrete store as
//! injected state, never through a global.

use std::future::Future;

use crate::{
  company::{Company, NewCompany},
  membership::{Member, Membership, NewMembership},
  person::{NewPerson, Person},
};

/// Result of [`DirectoryStore::attach_new_person`]: the freshly created person
/// and the join row linking them to the company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
  pub person:     Person,
  pub membership: Membership,
}

/// Abstraction over a Rolodex storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Companies ─────────────────────────────────────────────────────────

  /// All companies, ordered by id. Related people are not loaded.
  fn list_companies(
    &self,
  ) -> impl Future<Output = Result<Vec<Company>, Self::Error>> + Send + '_;

  /// Validate and persist a new company. `id`, `created_at` and
  /// `updated_at` are assigned by the store.
  fn create_company(
    &self,
    input: NewCompany,
  ) -> impl Future<Output = Result<Company, Self::Error>> + Send + '_;

  /// Retrieve a company by id. Returns `None` if not found.
  fn get_company(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Company>, Self::Error>> + Send + '_;

  /// Retrieve a company together with its people and their roles, read in a
  /// single snapshot. Returns `None` if the company does not exist.
  fn get_company_with_people(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<(Company, Vec<Member>)>, Self::Error>>
  + Send
  + '_;

  // ── People ────────────────────────────────────────────────────────────

  /// Validate and persist a new person with no company links.
  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  // ── Memberships ───────────────────────────────────────────────────────

  /// Link an existing person to an existing company.
  ///
  /// Returns an error if either side does not exist. Linking the same pair
  /// twice creates a second row.
  fn add_membership(
    &self,
    input: NewMembership,
  ) -> impl Future<Output = Result<Membership, Self::Error>> + Send + '_;

  /// All join rows for a company, ordered by id.
  fn list_memberships(
    &self,
    company_id: i64,
  ) -> impl Future<Output = Result<Vec<Membership>, Self::Error>> + Send + '_;

  /// Delete a join row. Returns `false` if no such row existed.
  fn remove_membership(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Create a brand-new person and link them to `company_id` in one
  /// transaction.
  ///
  /// Returns `None` (and writes nothing) if the company does not exist.
  /// There is no lookup of existing people by name: every call creates a new
  /// person.
  fn attach_new_person(
    &self,
    company_id: i64,
    person: NewPerson,
    role: Option<String>,
  ) -> impl Future<Output = Result<Option<Attachment>, Self::Error>> + Send + '_;
}
