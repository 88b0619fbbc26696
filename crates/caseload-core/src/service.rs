//! The assignment lifecycle service.
//!
//! Every transition is authorized against [`crate::policy`] before the store
//! is touched. The service holds no locks: a reactivation lookup and the
//! write that follows are separate round-trips, and concurrent requests for
//! the same pair may race.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  actor::Actor,
  assignment::{
    Assignment, AssignmentParent, Case, EntryMode, LookupKey, NewAssignment,
    Volunteer,
  },
  policy::{self, Action},
  store::AssignmentStore,
};

// ─── Requests and outcomes ───────────────────────────────────────────────────

/// A request to put a volunteer on a case, through one of the two entry
/// points.
#[derive(Debug, Clone)]
pub struct AssignmentRequest {
  pub case:      Case,
  pub volunteer: Volunteer,
  pub mode:      EntryMode,
}

impl AssignmentRequest {
  /// The entity this request is anchored on.
  pub fn parent(&self) -> AssignmentParent {
    match self.mode {
      EntryMode::CaseDriven => AssignmentParent::Case(self.case.case_id),
      EntryMode::VolunteerDriven => {
        AssignmentParent::Volunteer(self.volunteer.volunteer_id)
      }
    }
  }

  /// The organization the create policy is checked against. Always the
  /// case's, whichever side the request entered from.
  pub fn target_organization_id(&self) -> Uuid { self.case.organization_id }

  /// Volunteer-driven requests search the volunteer's assignments by case;
  /// case-driven requests search the case's assignments by volunteer.
  fn lookup_key(&self) -> LookupKey {
    match self.mode {
      EntryMode::VolunteerDriven => LookupKey::Case(self.case.case_id),
      EntryMode::CaseDriven => LookupKey::Volunteer(self.volunteer.volunteer_id),
    }
  }
}

/// The result of [`AssignmentService::create_or_reactivate`].
#[derive(Debug, Clone)]
pub struct Assigned {
  pub assignment:  Assignment,
  /// `true` if an existing inactive row was reused.
  pub reactivated: bool,
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Create-or-reactivate, deactivate, destroy, and contact-visibility
/// transitions over any [`AssignmentStore`].
///
/// Cloning is cheap — the store is reference-counted.
pub struct AssignmentService<S> {
  store: Arc<S>,
}

impl<S> Clone for AssignmentService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S> AssignmentService<S>
where
  S: AssignmentStore,
  Error: From<S::Error>,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Reactivate a matching inactive assignment or create a new one.
  pub async fn create_or_reactivate(
    &self,
    request: &AssignmentRequest,
    actor: &Actor,
  ) -> Result<Assigned> {
    policy::authorize(
      policy::can_create(actor, request.target_organization_id()),
      Action::Create,
    )?;

    let existing = self
      .store
      .find_inactive(request.parent(), request.lookup_key())
      .await?;

    if let Some(existing) = existing {
      let assignment = self.store.set_active(existing.assignment_id, true).await?;
      return Ok(Assigned { assignment, reactivated: true });
    }

    if request.case.organization_id != request.volunteer.organization_id {
      return Err(Error::invalid(
        "Volunteer and case must belong to the same organization",
      ));
    }

    let assignment = self
      .store
      .insert_assignment(NewAssignment {
        case_id:      request.case.case_id,
        volunteer_id: request.volunteer.volunteer_id,
      })
      .await?;
    Ok(Assigned { assignment, reactivated: false })
  }

  /// Permanently remove an assignment, active or not.
  pub async fn destroy(&self, assignment: &Assignment, actor: &Actor) -> Result<()> {
    policy::authorize(policy::can_destroy(actor), Action::Destroy)?;
    self.store.delete_assignment(assignment.assignment_id).await?;
    Ok(())
  }

  /// Take the volunteer off the case. `hide_old_contacts` is untouched.
  pub async fn deactivate(
    &self,
    assignment: &Assignment,
    actor: &Actor,
  ) -> Result<Assignment> {
    policy::authorize(policy::can_unassign(actor, assignment), Action::Unassign)?;
    Ok(self.store.set_active(assignment.assignment_id, false).await?)
  }

  /// Flip `hide_old_contacts` on an inactive assignment.
  pub async fn toggle_contact_visibility(
    &self,
    assignment: &Assignment,
    actor: &Actor,
  ) -> Result<Assignment> {
    policy::authorize(
      policy::can_toggle_contact_visibility(actor, assignment),
      Action::ToggleContactVisibility,
    )?;
    Ok(
      self
        .store
        .set_hide_old_contacts(assignment.assignment_id, !assignment.hide_old_contacts)
        .await?,
    )
  }

  /// Every assignment anchored on `parent`, current and past.
  pub async fn list_for(&self, parent: AssignmentParent) -> Result<Vec<Assignment>> {
    Ok(self.store.list_assignments(parent).await?)
  }
}
