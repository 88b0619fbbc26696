//! PATCH handler — take a volunteer off a case, keeping the assignment row.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use caseload_core::{Error as CoreError, store::AssignmentStore};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Authenticated,
  error::Error,
  handlers::{Outcome, RedirectParams, load_assignment, store_error},
};

/// `PATCH /assignments/:id/unassign[?redirect_to=volunteer]`
///
/// The redirect hint only shapes the response; it never reaches the service.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Authenticated(actor): Authenticated,
  Path(id): Path<Uuid>,
  Query(params): Query<RedirectParams>,
) -> Result<Json<Outcome>, Error>
where
  S: AssignmentStore + Clone + 'static,
  CoreError: From<S::Error>,
{
  let store = state.service.store();
  let assignment = load_assignment(store, &actor, id).await?;

  let case = store
    .get_case(assignment.case_id)
    .await
    .map_err(store_error)?
    .ok_or_else(|| Error::not_found(format!("case {}", assignment.case_id)))?;

  let updated = state.service.deactivate(&assignment, &actor).await?;

  tracing::info!(assignment_id = %id, role = %actor.role, "volunteer unassigned");

  Ok(Json(Outcome {
    redirect:   params.target_for(&updated),
    notice:     Some(format!(
      "Volunteer was unassigned from Case {}.",
      case.case_number
    )),
    assignment: Some(updated),
  }))
}
