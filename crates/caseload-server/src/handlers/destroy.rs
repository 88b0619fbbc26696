//! DELETE handler — permanently remove an assignment.
//!
//! The row is gone afterwards; clients that need a history trail should
//! unassign instead.

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
  handlers::{Outcome, RedirectParams, load_assignment},
};

/// `DELETE /assignments/:id[?redirect_to=volunteer]`
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
  let assignment = load_assignment(state.service.store(), &actor, id).await?;

  state.service.destroy(&assignment, &actor).await?;

  tracing::info!(assignment_id = %id, role = %actor.role, "assignment destroyed");

  Ok(Json(Outcome {
    assignment: None,
    notice:     None,
    redirect:   params.target_for(&assignment),
  }))
}
