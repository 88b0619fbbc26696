//! HTTP layer for Caseload.
//!
//! Exposes an axum [`Router`] serving the assignment lifecycle as JSON,
//! backed by any [`AssignmentStore`]. Requests are authenticated with HTTP
//! Basic credentials and resolved to an explicit [`Actor`]; the handlers own
//! entity resolution, notices, and redirect targets, while every decision is
//! made by [`AssignmentService`].
//!
//! [`Actor`]: caseload_core::actor::Actor

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, patch},
};
use caseload_core::{
  AssignmentService, Error as CoreError, actor::Role, store::AssignmentStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use auth::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub users:      Vec<UserConfig>,
}

/// One entry of the actor-resolution table.
#[derive(Deserialize, Clone)]
pub struct UserConfig {
  pub username:        String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash:   String,
  pub role:            Role,
  pub organization_id: Uuid,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: AssignmentStore> {
  pub service: AssignmentService<S>,
  pub auth:    Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the assignment API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: AssignmentStore + Clone + 'static,
  CoreError: From<S::Error>,
{
  Router::new()
    .route(
      "/cases/{case_id}/assignments",
      get(handlers::list::for_case::<S>).post(handlers::create::for_case::<S>),
    )
    .route(
      "/volunteers/{volunteer_id}/assignments",
      get(handlers::list::for_volunteer::<S>)
        .post(handlers::create::for_volunteer::<S>),
    )
    .route("/assignments/{id}", delete(handlers::destroy::handler::<S>))
    .route("/assignments/{id}/unassign", patch(handlers::unassign::handler::<S>))
    .route("/assignments/{id}/contacts", patch(handlers::contacts::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
  use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version, password_hash::SaltString};
  use rand_core::OsRng;

  /// An argon2id hash with minimal cost parameters; verification reads the
  /// parameters back out of the PHC string.
  pub fn cheap_hash(password: &str) -> String {
    let params = Params::new(1024, 1, 1, None).unwrap();
    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
