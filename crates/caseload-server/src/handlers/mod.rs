//! JSON handlers for assignment routes.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/cases/:case_id/assignments` | Current and past assignees of a case |
//! | `POST`   | `/cases/:case_id/assignments` | Body: `{"volunteer_id":"..."}` |
//! | `GET`    | `/volunteers/:volunteer_id/assignments` | Current and past cases of a volunteer |
//! | `POST`   | `/volunteers/:volunteer_id/assignments` | Body: `{"case_id":"..."}` |
//! | `DELETE` | `/assignments/:id` | Hard delete; `?redirect_to=volunteer` |
//! | `PATCH`  | `/assignments/:id/unassign` | `?redirect_to=volunteer` |
//! | `PATCH`  | `/assignments/:id/contacts` | Hide or show old case contacts |

pub mod contacts;
pub mod create;
pub mod destroy;
pub mod list;
pub mod unassign;

use caseload_core::{
  Error as CoreError,
  actor::Actor,
  assignment::{Assignment, AssignmentParent},
  store::AssignmentStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

// ─── Response shapes ─────────────────────────────────────────────────────────

/// Where the client should navigate after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RedirectTarget {
  Case(Uuid),
  Volunteer(Uuid),
}

impl From<AssignmentParent> for RedirectTarget {
  fn from(parent: AssignmentParent) -> Self {
    match parent {
      AssignmentParent::Case(id) => Self::Case(id),
      AssignmentParent::Volunteer(id) => Self::Volunteer(id),
    }
  }
}

/// Body returned by every successful transition.
#[derive(Debug, Serialize)]
pub struct Outcome {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assignment: Option<Assignment>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notice:     Option<String>,
  pub redirect:   RedirectTarget,
}

// ─── Query parameters ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectKind {
  #[default]
  Case,
  Volunteer,
}

/// `?redirect_to=case|volunteer`; defaults to the case page.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectParams {
  #[serde(default)]
  pub redirect_to: RedirectKind,
}

impl RedirectParams {
  pub fn target_for(&self, assignment: &Assignment) -> RedirectTarget {
    match self.redirect_to {
      RedirectKind::Case => RedirectTarget::Case(assignment.case_id),
      RedirectKind::Volunteer => RedirectTarget::Volunteer(assignment.volunteer_id),
    }
  }
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

/// Convert a backend error through the core taxonomy.
pub(crate) fn store_error<E>(err: E) -> Error
where
  CoreError: From<E>,
{
  Error::Core(CoreError::from(err))
}

/// Load an assignment scoped to the actor's organization (through its case).
/// Anything outside that scope is reported as not found.
pub(crate) async fn load_assignment<S>(
  store: &S,
  actor: &Actor,
  id: Uuid,
) -> Result<Assignment, Error>
where
  S: AssignmentStore,
  CoreError: From<S::Error>,
{
  store
    .get_assignment(id)
    .await
    .map_err(store_error)?
    .filter(|a| actor.belongs_to(a.organization_id))
    .ok_or_else(|| Error::not_found(format!("assignment {id}")))
}
