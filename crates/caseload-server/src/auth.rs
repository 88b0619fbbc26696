//! HTTP Basic-auth actor resolution.
//!
//! Each configured user maps to exactly one [`Actor`]; the extractor hands
//! that actor to the handlers, which pass it explicitly into the service.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use caseload_core::{actor::Actor, store::AssignmentStore};

use crate::{AppState, UserConfig, error::Error};

/// The actor-resolution table for this server instance.
#[derive(Clone, Default)]
pub struct AuthConfig {
  pub users: Vec<UserConfig>,
}

impl AuthConfig {
  pub fn new(users: Vec<UserConfig>) -> Self { Self { users } }

  fn user(&self, username: &str) -> Option<&UserConfig> {
    self.users.iter().find(|u| u.username == username)
  }
}

/// Present in a handler means the request was authenticated as this actor.
pub struct Authenticated(pub Actor);

/// Verify Basic credentials from headers and resolve them to an actor.
pub fn resolve_actor(headers: &HeaderMap, config: &AuthConfig) -> Result<Actor, Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let user = config.user(username).ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(Actor::new(user.role, user.organization_id))
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: AssignmentStore + Clone + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let actor = resolve_actor(&parts.headers, &state.auth).inspect_err(|_| {
      tracing::debug!(uri = %parts.uri, "rejected credentials");
    })?;
    Ok(Authenticated(actor))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::{Request, header};
  use caseload_core::actor::Role;
  use uuid::Uuid;

  use crate::test_support::cheap_hash;

  fn config(org: Uuid) -> AuthConfig {
    AuthConfig::new(vec![
      UserConfig {
        username:        "ada".to_string(),
        password_hash:   cheap_hash("secret"),
        role:            Role::Admin,
        organization_id: org,
      },
      UserConfig {
        username:        "vic".to_string(),
        password_hash:   cheap_hash("hunter2"),
        role:            Role::Volunteer,
        organization_id: org,
      },
    ])
  }

  fn headers(value: &str) -> HeaderMap {
    let req = Request::builder()
      .header(header::AUTHORIZATION, value)
      .body(())
      .unwrap();
    req.headers().clone()
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[test]
  fn resolves_configured_user_to_actor() {
    let org = Uuid::new_v4();
    let cfg = config(org);

    let actor = resolve_actor(&headers(&basic("ada", "secret")), &cfg).unwrap();
    assert_eq!(actor, Actor::new(Role::Admin, org));

    let actor = resolve_actor(&headers(&basic("vic", "hunter2")), &cfg).unwrap();
    assert_eq!(actor.role, Role::Volunteer);
  }

  #[test]
  fn wrong_password() {
    let cfg = config(Uuid::new_v4());
    let res = resolve_actor(&headers(&basic("ada", "wrong")), &cfg);
    assert!(matches!(res, Err(Error::Unauthorized)));
  }

  #[test]
  fn unknown_user() {
    let cfg = config(Uuid::new_v4());
    let res = resolve_actor(&headers(&basic("mallory", "secret")), &cfg);
    assert!(matches!(res, Err(Error::Unauthorized)));
  }

  #[test]
  fn missing_header() {
    let cfg = config(Uuid::new_v4());
    assert!(matches!(resolve_actor(&HeaderMap::new(), &cfg), Err(Error::Unauthorized)));
  }

  #[test]
  fn invalid_base64() {
    let cfg = config(Uuid::new_v4());
    let res = resolve_actor(&headers("Basic !!!not-base64!!!"), &cfg);
    assert!(matches!(res, Err(Error::Unauthorized)));
  }
}
