//! The `AssignmentStore` trait — the persistence collaborator of the
//! lifecycle service.
//!
//! The trait is implemented by storage backends (e.g.
//! `caseload-store-sqlite`). Each method is a single round-trip; no method
//! spans a read and a write atomically.

use std::future::Future;

use uuid::Uuid;

use crate::assignment::{
  Assignment, AssignmentParent, Case, LookupKey, NewAssignment, Volunteer,
};

/// Abstraction over a Caseload storage backend.
///
/// The associated error must convert into [`crate::Error`]; backends map
/// their validation failures to [`crate::Error::ValidationFailed`] and
/// missing rows to [`crate::Error::NotFound`].
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AssignmentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Referenced entities ───────────────────────────────────────────────

  /// Persist a new case in `organization_id`.
  fn add_case(
    &self,
    organization_id: Uuid,
    case_number: String,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  /// Persist a new volunteer in `organization_id`.
  fn add_volunteer(
    &self,
    organization_id: Uuid,
    display_name: String,
  ) -> impl Future<Output = Result<Volunteer, Self::Error>> + Send + '_;

  /// Retrieve a case by UUID. Returns `None` if not found.
  fn get_case(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// Retrieve a volunteer by UUID. Returns `None` if not found.
  fn get_volunteer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Volunteer>, Self::Error>> + Send + '_;

  // ── Assignments — reads ───────────────────────────────────────────────

  /// Retrieve an assignment by UUID, with its organization resolved through
  /// the case. Returns `None` if not found.
  fn get_assignment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  /// Return the oldest inactive assignment anchored on `parent` whose `key`
  /// column matches.
  fn find_inactive(
    &self,
    parent: AssignmentParent,
    key: LookupKey,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  /// All assignments anchored on `parent`, oldest first.
  fn list_assignments(
    &self,
    parent: AssignmentParent,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;

  // ── Assignments — writes ──────────────────────────────────────────────

  /// Insert a new active assignment with contacts visible.
  ///
  /// Returns a validation error if the case or volunteer does not exist.
  fn insert_assignment(
    &self,
    input: NewAssignment,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  /// Set the `active` flag and return the updated row.
  fn set_active(
    &self,
    id: Uuid,
    active: bool,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  /// Set the `hide_old_contacts` flag and return the updated row.
  fn set_hide_old_contacts(
    &self,
    id: Uuid,
    hide: bool,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  /// Permanently remove an assignment. This is the only deletion path.
  fn delete_assignment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
