//! Listing handlers: every assignment of a case or a volunteer, current and
//! past. The parent must belong to the actor's organization.

use axum::{
  Json,
  extract::{Path, State},
};
use caseload_core::{
  Error as CoreError,
  assignment::{Assignment, AssignmentParent},
  store::AssignmentStore,
};
use uuid::Uuid;

use crate::{AppState, auth::Authenticated, error::Error, handlers::store_error};

/// `GET /cases/:case_id/assignments`
pub async fn for_case<S>(
  State(state): State<AppState<S>>,
  Authenticated(actor): Authenticated,
  Path(case_id): Path<Uuid>,
) -> Result<Json<Vec<Assignment>>, Error>
where
  S: AssignmentStore + Clone + 'static,
  CoreError: From<S::Error>,
{
  state
    .service
    .store()
    .get_case(case_id)
    .await
    .map_err(store_error)?
    .filter(|c| actor.belongs_to(c.organization_id))
    .ok_or_else(|| Error::not_found(format!("case {case_id}")))?;

  let assignments = state.service.list_for(AssignmentParent::Case(case_id)).await?;
  Ok(Json(assignments))
}

/// `GET /volunteers/:volunteer_id/assignments`
pub async fn for_volunteer<S>(
  State(state): State<AppState<S>>,
  Authenticated(actor): Authenticated,
  Path(volunteer_id): Path<Uuid>,
) -> Result<Json<Vec<Assignment>>, Error>
where
  S: AssignmentStore + Clone + 'static,
  CoreError: From<S::Error>,
{
  state
    .service
    .store()
    .get_volunteer(volunteer_id)
    .await
    .map_err(store_error)?
    .filter(|v| actor.belongs_to(v.organization_id))
    .ok_or_else(|| Error::not_found(format!("volunteer {volunteer_id}")))?;

  let assignments = state
    .service
    .list_for(AssignmentParent::Volunteer(volunteer_id))
    .await?;
  Ok(Json(assignments))
}
