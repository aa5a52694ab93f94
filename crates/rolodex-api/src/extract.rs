//! Request extractors shared by the handlers.

use axum::{
  Form, Json,
  extract::{FromRequest, FromRequestParts, Path, Request},
  http::{HeaderMap, StatusCode, header, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

// ─── Numeric path id ──────────────────────────────────────────────────────────

/// A `{id}` path segment made only of ASCII digits.
///
/// Anything else is treated as if the route had not matched at all: the
/// rejection is a bare `404`, the same response the router gives for an
/// unknown path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericId(pub i64);

impl NumericId {
  pub fn parse(segment: &str) -> Option<Self> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    segment.parse().ok().map(Self)
  }
}

impl<S> FromRequestParts<S> for NumericId
where
  S: Send + Sync,
{
  type Rejection = StatusCode;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Path(segment) = Path::<String>::from_request_parts(parts, state)
      .await
      .map_err(|_| StatusCode::NOT_FOUND)?;
    Self::parse(&segment).ok_or(StatusCode::NOT_FOUND)
  }
}

// ─── JSON or form body ────────────────────────────────────────────────────────

/// A request body accepted either as `application/json` or as
/// `application/x-www-form-urlencoded`.
///
/// A request with no `Content-Type` is read as an empty object, so every
/// field of `T` is absent and validation reports what is missing.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
  Json,
  Form,
  Missing,
  Other(String),
}

impl BodyKind {
  fn of(headers: &HeaderMap) -> Self {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
      return Self::Missing;
    };
    let raw = value.to_str().unwrap_or_default();
    let mime = raw
      .split(';')
      .next()
      .unwrap_or_default()
      .trim()
      .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
      Self::Json
    } else if mime == "application/x-www-form-urlencoded" {
      Self::Form
    } else {
      Self::Other(raw.to_owned())
    }
  }
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let kind = BodyKind::of(req.headers());
    match kind {
      BodyKind::Json => {
        let Json(value) = Json::<T>::from_request(req, state)
          .await
          .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
      }
      BodyKind::Form => {
        let Form(value) = Form::<T>::from_request(req, state)
          .await
          .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
      }
      BodyKind::Missing => serde_json::from_value(serde_json::json!({}))
        .map(Self)
        .map_err(|e| ApiError::BadRequest(e.to_string())),
      BodyKind::Other(content_type) => Err(ApiError::UnsupportedMediaType(
        format!("expected JSON or form body, got {content_type:?}"),
      )),
    }
  }
}
