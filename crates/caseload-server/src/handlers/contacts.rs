//! PATCH handler — hide or show the case contacts a former volunteer
//! recorded.

use axum::{
  Json,
  extract::{Path, State},
};
use caseload_core::{Error as CoreError, policy, store::AssignmentStore};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Authenticated,
  error::Error,
  handlers::{Outcome, RedirectTarget, load_assignment, store_error},
};

/// `PATCH /assignments/:id/contacts`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Authenticated(actor): Authenticated,
  Path(id): Path<Uuid>,
) -> Result<Json<Outcome>, Error>
where
  S: AssignmentStore + Clone + 'static,
  CoreError: From<S::Error>,
{
  let store = state.service.store();
  let assignment = load_assignment(store, &actor, id).await?;

  let volunteer = store
    .get_volunteer(assignment.volunteer_id)
    .await
    .map_err(store_error)?
    .ok_or_else(|| {
      Error::not_found(format!("volunteer {}", assignment.volunteer_id))
    })?;

  // Decided before the flip: a toggle that is allowed to hide is hiding.
  let hiding = policy::can_hide_contacts(&actor, &assignment);

  let updated = state
    .service
    .toggle_contact_visibility(&assignment, &actor)
    .await?;

  let outcome = if hiding {
    "were successfully hidden"
  } else {
    "are now visible"
  };

  tracing::info!(
    assignment_id     = %id,
    hide_old_contacts = updated.hide_old_contacts,
    role              = %actor.role,
    "contact visibility toggled"
  );

  Ok(Json(Outcome {
    redirect:   RedirectTarget::Case(updated.case_id),
    notice:     Some(format!(
      "Old Case Contacts created by {} {outcome}.",
      volunteer.display_name
    )),
    assignment: Some(updated),
  }))
}
