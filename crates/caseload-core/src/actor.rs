//! The user attempting an action, already resolved from a session or
//! credential by the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role an actor holds within their organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  Supervisor,
  Volunteer,
}

impl Role {
  /// Admins and supervisors are jointly "privileged".
  pub fn is_privileged(self) -> bool {
    matches!(self, Self::Admin | Self::Supervisor)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Supervisor => "supervisor",
      Self::Volunteer => "volunteer",
    }
  }
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An explicit actor value, passed into every policy check and transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
  pub role:            Role,
  pub organization_id: Uuid,
}

impl Actor {
  pub fn new(role: Role, organization_id: Uuid) -> Self {
    Self { role, organization_id }
  }

  pub fn is_privileged(&self) -> bool { self.role.is_privileged() }

  pub fn belongs_to(&self, organization_id: Uuid) -> bool {
    self.organization_id == organization_id
  }
}
