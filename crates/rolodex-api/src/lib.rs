//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rolodex_core::store::DirectoryStore`]. The store is handed in by the
//! caller and shared with every handler as router state.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = rolodex_api::app(Arc::new(store));
//! axum::serve(listener, app).await?;
//! ```

pub mod companies;
pub mod error;
pub mod extract;
pub mod settings;

use std::sync::Arc;

use axum::{
  Router,
  http::StatusCode,
  routing::{get, post},
};
use rolodex_core::store::DirectoryStore;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

pub use error::ApiError;
pub use settings::ServerConfig;

/// Path prefix under which [`api_router`] is mounted by [`app`].
pub const API_PREFIX: &str = "/api";

/// Build the `/companies` routes for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DirectoryStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/companies",
      get(companies::list::<S>).post(companies::create::<S>),
    )
    .route("/companies/{id}", get(companies::get_one::<S>))
    .route("/companies/{id}/people", post(companies::attach_person::<S>))
    .with_state(store)
}

/// The full application: [`api_router`] under [`API_PREFIX`], a bare 404 for
/// everything else, permissive CORS and request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: DirectoryStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .nest(API_PREFIX, api_router(store))
    .fallback(|| async { StatusCode::NOT_FOUND })
    .layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
