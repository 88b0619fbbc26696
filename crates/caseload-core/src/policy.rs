//! Authorization policy for assignment transitions.
//!
//! Every predicate is a pure, total function of the actor and the target
//! entity or organization. Callers translate `false` into
//! [`Error::Forbidden`](crate::Error::Forbidden).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, actor::Actor, assignment::Assignment};

/// A guarded assignment transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
  Create,
  Destroy,
  Unassign,
  ToggleContactVisibility,
}

impl std::fmt::Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Self::Create => "create assignment",
      Self::Destroy => "destroy assignment",
      Self::Unassign => "unassign volunteer",
      Self::ToggleContactVisibility => "toggle contact visibility",
    })
  }
}

/// Privileged actor of the target organization.
pub fn can_create(actor: &Actor, target_organization_id: Uuid) -> bool {
  actor.is_privileged() && actor.belongs_to(target_organization_id)
}

/// Any privileged actor. The organization is not compared here; lookup of the
/// assignment is expected to be organization-scoped by the caller.
pub fn can_destroy(actor: &Actor) -> bool { actor.is_privileged() }

/// Active assignment, privileged actor, same organization.
pub fn can_unassign(actor: &Actor, assignment: &Assignment) -> bool {
  assignment.active
    && actor.is_privileged()
    && actor.belongs_to(assignment.organization_id)
}

/// Inactive assignment whose contacts are still visible, privileged actor.
pub fn can_hide_contacts(actor: &Actor, assignment: &Assignment) -> bool {
  !assignment.active && !assignment.hide_old_contacts && actor.is_privileged()
}

/// Inactive assignment, privileged actor. Hiding and showing share one gate;
/// like [`can_destroy`], the organization is not compared.
pub fn can_toggle_contact_visibility(actor: &Actor, assignment: &Assignment) -> bool {
  !assignment.active && actor.is_privileged()
}

/// Map a predicate result to `Ok(())` or [`Error::Forbidden`].
pub fn authorize(allowed: bool, action: Action) -> Result<()> {
  if allowed { Ok(()) } else { Err(Error::Forbidden(action)) }
}
