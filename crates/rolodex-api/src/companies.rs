//! Handlers for `/companies` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/companies` | Every stored row; people are not loaded |
//! | `POST` | `/companies` | Body: [`CompanyBody`]; returns 201 + [`CompanyView`] |
//! | `GET`  | `/companies/:id` | Company with its people; 404 if not found |
//! | `POST` | `/companies/:id/people` | Body: [`PersonBody`]; creates a person and links it |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use rolodex_core::{
  company::{COMPANY_RULES, Company, NewCompany},
  membership::Membership,
  person::{NewPerson, PERSON_RULES},
  store::DirectoryStore,
  validate::{RuleSet, Validate, Violations},
  view::CompanyView,
};
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  extract::{JsonOrForm, NumericId},
};

// ─── Envelopes ────────────────────────────────────────────────────────────────

/// `{"data": ...}` — the success envelope for reads and creates.
#[derive(Debug, Serialize, Deserialize)]
pub struct Data<T> {
  pub data: T,
}

/// `{"ok": ...}` — the success envelope for attach.
#[derive(Debug, Serialize, Deserialize)]
pub struct Attached<T> {
  pub ok: T,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /companies`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Data<Vec<Company>>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let companies = store.list_companies().await.map_err(ApiError::store)?;
  Ok(Json(Data { data: companies }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Body accepted by `POST /companies`. Every field is optional at the parsing
/// stage so that missing fields surface as validation violations rather than
/// deserialisation errors.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyBody {
  pub name:    Option<String>,
  pub address: Option<String>,
  pub city:    Option<String>,
  pub country: Option<String>,
  pub email:   Option<String>,
  pub phone:   Option<String>,
}

impl Validate for CompanyBody {
  fn rules() -> &'static RuleSet { &COMPANY_RULES }

  fn field(&self, name: &str) -> Option<&str> {
    match name {
      "name" => self.name.as_deref(),
      "address" => self.address.as_deref(),
      "city" => self.city.as_deref(),
      "country" => self.country.as_deref(),
      "email" => self.email.as_deref(),
      "phone" => self.phone.as_deref(),
      _ => None,
    }
  }
}

impl CompanyBody {
  /// Validate and convert into the store's input type.
  pub fn into_new_company(self) -> Result<NewCompany, Violations> {
    self.validate()?;
    Ok(NewCompany {
      name:    self.name.unwrap_or_default(),
      address: self.address.unwrap_or_default(),
      city:    self.city.unwrap_or_default(),
      country: self.country.unwrap_or_default(),
      email:   self.email,
      phone:   self.phone,
    })
  }
}

/// `POST /companies` — returns 201 + the new company with an empty `people`
/// list.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonOrForm(body): JsonOrForm<CompanyBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = body.into_new_company()?;
  let company = store.create_company(input).await.map_err(ApiError::store)?;
  tracing::info!(company_id = company.id, name = %company.name, "created company");

  Ok((
    StatusCode::CREATED,
    Json(Data { data: CompanyView::new(company, Vec::new()) }),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /companies/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  NumericId(id): NumericId,
) -> Result<Json<Data<CompanyView>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (company, members) = store
    .get_company_with_people(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(ApiError::company_not_found)?;

  Ok(Json(Data { data: CompanyView::new(company, members) }))
}

// ─── Attach person ────────────────────────────────────────────────────────────

/// Body accepted by `POST /companies/:id/people`.
#[derive(Debug, Default, Deserialize)]
pub struct PersonBody {
  pub name: Option<String>,
}

impl Validate for PersonBody {
  fn rules() -> &'static RuleSet { &PERSON_RULES }

  fn field(&self, name: &str) -> Option<&str> {
    match name {
      "name" => self.name.as_deref(),
      _ => None,
    }
  }
}

/// `POST /companies/:id/people` — always creates a new person, even when one
/// with the same name is already linked, and links it with no role.
pub async fn attach_person<S>(
  State(store): State<Arc<S>>,
  NumericId(company_id): NumericId,
  JsonOrForm(body): JsonOrForm<PersonBody>,
) -> Result<Json<Attached<Membership>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  body.validate()?;
  let person = NewPerson::new(body.name.unwrap_or_default());

  let attachment = store
    .attach_new_person(company_id, person, None)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(ApiError::company_not_found)?;

  tracing::info!(
    company_id,
    person_id = attachment.person.id,
    membership_id = attachment.membership.id,
    "attached person to company"
  );

  Ok(Json(Attached { ok: attachment.membership }))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full_body() -> CompanyBody {
    CompanyBody {
      name:    Some("Acme".into()),
      address: Some("1 Main Street".into()),
      city:    Some("Springfield".into()),
      country: Some("US".into()),
      email:   None,
      phone:   None,
    }
  }

  #[test]
  fn complete_body_converts() {
    let input = full_body().into_new_company().unwrap();
    assert_eq!(input.name, "Acme");
    assert_eq!(input.email, None);
  }

  #[test]
  fn empty_body_reports_every_required_field() {
    let err = CompanyBody::default().into_new_company().unwrap_err();
    for field in ["name", "address", "city", "country"] {
      assert!(err.has_field(field), "missing violation for {field}: {err}");
    }
    assert!(!err.has_field("email"));
    assert!(!err.has_field("phone"));
  }

  #[test]
  fn person_body_requires_name() {
    assert!(PersonBody::default().validate().is_err());
    assert!(PersonBody { name: Some("Alice".into()) }.validate().is_ok());
  }
}
