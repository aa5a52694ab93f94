//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error is rendered as a JSON object with an `"error"` key and a
//! non-2xx status.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rolodex_core::validate::Violations;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation failed: {0}")]
  Validation(#[from] Violations),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unsupported media type: {0}")]
  UnsupportedMediaType(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub const COMPANY_NOT_FOUND: &'static str = "Company not found";

  pub fn company_not_found() -> Self {
    Self::NotFound(Self::COMPANY_NOT_FOUND.to_owned())
  }

  /// Wrap a backend error, logging it on the way out.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    tracing::error!(error = %e, "store operation failed");
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(v) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": "validation failed", "violations": v })),
      )
        .into_response(),
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::UnsupportedMediaType(m) => (
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Json(json!({ "error": m })),
      )
        .into_response(),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}
