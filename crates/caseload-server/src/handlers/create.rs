//! Create-or-reactivate handlers for both entry points.
//!
//! The parent is resolved without organization scoping so the create policy
//! decides cross-organization requests (`403`); a missing parent is `404`.
//! A missing counterpart is a validation failure, as the original form would
//! report it.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use caseload_core::{
  AssignmentRequest, Error as CoreError,
  assignment::EntryMode,
  store::AssignmentStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  auth::Authenticated,
  error::Error,
  handlers::{Outcome, store_error},
};

#[derive(Debug, Deserialize)]
pub struct ForCaseBody {
  pub volunteer_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ForVolunteerBody {
  pub case_id: Uuid,
}

/// `POST /cases/:case_id/assignments` — assign a volunteer to a case.
pub async fn for_case<S>(
  State(state): State<AppState<S>>,
  Authenticated(actor): Authenticated,
  Path(case_id): Path<Uuid>,
  Json(body): Json<ForCaseBody>,
) -> Result<impl IntoResponse, Error>
where
  S: AssignmentStore + Clone + 'static,
  CoreError: From<S::Error>,
{
  handle(&state, &actor, EntryMode::CaseDriven, case_id, body.volunteer_id).await
}

/// `POST /volunteers/:volunteer_id/assignments` — assign a case to a volunteer.
pub async fn for_volunteer<S>(
  State(state): State<AppState<S>>,
  Authenticated(actor): Authenticated,
  Path(volunteer_id): Path<Uuid>,
  Json(body): Json<ForVolunteerBody>,
) -> Result<impl IntoResponse, Error>
where
  S: AssignmentStore + Clone + 'static,
  CoreError: From<S::Error>,
{
  handle(&state, &actor, EntryMode::VolunteerDriven, body.case_id, volunteer_id).await
}

async fn handle<S>(
  state: &AppState<S>,
  actor: &caseload_core::actor::Actor,
  mode: EntryMode,
  case_id: Uuid,
  volunteer_id: Uuid,
) -> Result<(StatusCode, Json<Outcome>), Error>
where
  S: AssignmentStore + Clone + 'static,
  CoreError: From<S::Error>,
{
  let store = state.service.store();

  let case = store.get_case(case_id).await.map_err(store_error)?;
  let volunteer = store.get_volunteer(volunteer_id).await.map_err(store_error)?;

  let (case, volunteer) = match (mode, case, volunteer) {
    (_, Some(case), Some(volunteer)) => (case, volunteer),
    (EntryMode::CaseDriven, None, _) => {
      return Err(Error::not_found(format!("case {case_id}")));
    }
    (EntryMode::VolunteerDriven, _, None) => {
      return Err(Error::not_found(format!("volunteer {volunteer_id}")));
    }
    (_, None, _) => return Err(CoreError::invalid("Case must exist").into()),
    (_, _, None) => return Err(CoreError::invalid("Volunteer must exist").into()),
  };

  let request = AssignmentRequest { case, volunteer, mode };
  let assigned = state.service.create_or_reactivate(&request, actor).await?;

  let (status, notice) = if assigned.reactivated {
    (StatusCode::OK, "Volunteer reassigned to case")
  } else {
    (StatusCode::CREATED, "Volunteer assigned to case")
  };

  tracing::info!(
    assignment_id = %assigned.assignment.assignment_id,
    reactivated   = assigned.reactivated,
    role          = %actor.role,
    "{notice}"
  );

  Ok((
    status,
    Json(Outcome {
      assignment: Some(assigned.assignment),
      notice:     Some(notice.to_string()),
      redirect:   request.parent().into(),
    }),
  ))
}
