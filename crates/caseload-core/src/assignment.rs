//! Cases, volunteers, and the assignment that links them.
//!
//! An assignment references (never owns) one case and one volunteer. Its
//! effective organization is always the case's organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Referenced entities ─────────────────────────────────────────────────────

/// A case, as resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
  pub case_id:         Uuid,
  pub organization_id: Uuid,
  /// Human-facing case number, e.g. `"CINA-24-0042"`.
  pub case_number:     String,
}

/// A volunteer, as resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
  pub volunteer_id:    Uuid,
  pub organization_id: Uuid,
  pub display_name:    String,
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// Relates one case to one volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
  pub assignment_id:     Uuid,
  pub case_id:           Uuid,
  pub volunteer_id:      Uuid,
  /// Derived from the referenced case; never stored on the assignment itself.
  pub organization_id:   Uuid,
  /// `true` while the volunteer currently works the case.
  pub active:            bool,
  /// Hides contacts the volunteer recorded on the case. Only toggled while
  /// the assignment is inactive.
  pub hide_old_contacts: bool,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

/// Input for [`AssignmentStore::insert_assignment`](crate::store::AssignmentStore::insert_assignment).
///
/// New rows are always active with contacts visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAssignment {
  pub case_id:      Uuid,
  pub volunteer_id: Uuid,
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Which entry point a create request came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
  /// Assigning a volunteer to a case; the case is the parent.
  CaseDriven,
  /// Assigning a case to a volunteer; the volunteer is the parent.
  VolunteerDriven,
}

/// The entity a lookup or listing is anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentParent {
  Case(Uuid),
  Volunteer(Uuid),
}

/// The column a reactivation search matches on within a parent's assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKey {
  Case(Uuid),
  Volunteer(Uuid),
}
