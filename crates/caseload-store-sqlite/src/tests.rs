//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use caseload_core::{
  AssignmentRequest, AssignmentService,
  actor::{Actor, Role},
  assignment::{AssignmentParent, Case, EntryMode, LookupKey, NewAssignment, Volunteer},
  store::AssignmentStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn pair(s: &SqliteStore, org: Uuid) -> (Case, Volunteer) {
  let case = s.add_case(org, "CINA-24-0001".into()).await.unwrap();
  let volunteer = s.add_volunteer(org, "Ada Advocate".into()).await.unwrap();
  (case, volunteer)
}

fn new_assignment(case: &Case, volunteer: &Volunteer) -> NewAssignment {
  NewAssignment { case_id: case.case_id, volunteer_id: volunteer.volunteer_id }
}

// ─── Cases and volunteers ────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_case_and_volunteer() {
  let s = store().await;
  let org = Uuid::new_v4();
  let (case, volunteer) = pair(&s, org).await;

  let fetched = s.get_case(case.case_id).await.unwrap().unwrap();
  assert_eq!(fetched, case);

  let fetched = s.get_volunteer(volunteer.volunteer_id).await.unwrap().unwrap();
  assert_eq!(fetched, volunteer);
}

#[tokio::test]
async fn missing_entities_return_none() {
  let s = store().await;
  assert!(s.get_case(Uuid::new_v4()).await.unwrap().is_none());
  assert!(s.get_volunteer(Uuid::new_v4()).await.unwrap().is_none());
  assert!(s.get_assignment(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assignment_defaults() {
  let s = store().await;
  let org = Uuid::new_v4();
  let (case, volunteer) = pair(&s, org).await;

  let a = s.insert_assignment(new_assignment(&case, &volunteer)).await.unwrap();
  assert!(a.active);
  assert!(!a.hide_old_contacts);
  assert_eq!(a.organization_id, org);

  let fetched = s.get_assignment(a.assignment_id).await.unwrap().unwrap();
  assert_eq!(fetched.assignment_id, a.assignment_id);
  assert_eq!(fetched.organization_id, org);
  assert!(fetched.active);
}

#[tokio::test]
async fn organization_follows_case() {
  let s = store().await;
  let case_org = Uuid::new_v4();
  let case = s.add_case(case_org, "CINA-9".into()).await.unwrap();
  let volunteer = s.add_volunteer(Uuid::new_v4(), "Elsewhere".into()).await.unwrap();

  let a = s.insert_assignment(new_assignment(&case, &volunteer)).await.unwrap();
  assert_eq!(a.organization_id, case_org);
}

#[tokio::test]
async fn insert_with_missing_references_reports_messages() {
  let s = store().await;
  let err = s
    .insert_assignment(NewAssignment {
      case_id:      Uuid::new_v4(),
      volunteer_id: Uuid::new_v4(),
    })
    .await
    .unwrap_err();

  match err {
    Error::Validation(messages) => {
      assert_eq!(messages, ["Case must exist", "Volunteer must exist"]);
    }
    other => panic!("expected validation error, got {other:?}"),
  }
}

#[tokio::test]
async fn validation_maps_to_core_error() {
  let core: caseload_core::Error = Error::Validation(vec!["Case must exist".into()]).into();
  assert!(matches!(core, caseload_core::Error::ValidationFailed(_)));

  let core: caseload_core::Error = Error::AssignmentNotFound(Uuid::new_v4()).into();
  assert!(matches!(core, caseload_core::Error::NotFound(_)));
}

// ─── Flags ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn set_flags_roundtrip() {
  let s = store().await;
  let (case, volunteer) = pair(&s, Uuid::new_v4()).await;
  let a = s.insert_assignment(new_assignment(&case, &volunteer)).await.unwrap();

  let inactive = s.set_active(a.assignment_id, false).await.unwrap();
  assert!(!inactive.active);
  assert!(inactive.updated_at >= a.updated_at);

  let hidden = s.set_hide_old_contacts(a.assignment_id, true).await.unwrap();
  assert!(hidden.hide_old_contacts);
  assert!(!hidden.active);
}

#[tokio::test]
async fn set_flag_on_missing_assignment() {
  let s = store().await;
  let id = Uuid::new_v4();
  assert!(matches!(
    s.set_active(id, true).await,
    Err(Error::AssignmentNotFound(missing)) if missing == id
  ));
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_inactive_matches_parent_and_key() {
  let s = store().await;
  let org = Uuid::new_v4();
  let (case, volunteer) = pair(&s, org).await;
  let a = s.insert_assignment(new_assignment(&case, &volunteer)).await.unwrap();

  let by_case = AssignmentParent::Case(case.case_id);
  let key = LookupKey::Volunteer(volunteer.volunteer_id);

  // Active rows are never candidates.
  assert!(s.find_inactive(by_case, key).await.unwrap().is_none());

  s.set_active(a.assignment_id, false).await.unwrap();
  let found = s.find_inactive(by_case, key).await.unwrap().unwrap();
  assert_eq!(found.assignment_id, a.assignment_id);

  let by_volunteer = AssignmentParent::Volunteer(volunteer.volunteer_id);
  let found = s
    .find_inactive(by_volunteer, LookupKey::Case(case.case_id))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.assignment_id, a.assignment_id);

  let other = LookupKey::Volunteer(Uuid::new_v4());
  assert!(s.find_inactive(by_case, other).await.unwrap().is_none());
}

#[tokio::test]
async fn find_inactive_prefers_oldest() {
  let s = store().await;
  let (case, volunteer) = pair(&s, Uuid::new_v4()).await;
  let first = s.insert_assignment(new_assignment(&case, &volunteer)).await.unwrap();
  let second = s.insert_assignment(new_assignment(&case, &volunteer)).await.unwrap();
  s.set_active(second.assignment_id, false).await.unwrap();
  s.set_active(first.assignment_id, false).await.unwrap();

  let found = s
    .find_inactive(
      AssignmentParent::Case(case.case_id),
      LookupKey::Volunteer(volunteer.volunteer_id),
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.assignment_id, first.assignment_id);
}

#[tokio::test]
async fn list_assignments_by_parent() {
  let s = store().await;
  let org = Uuid::new_v4();
  let (case, volunteer) = pair(&s, org).await;
  let other = s.add_volunteer(org, "Bo Backup".into()).await.unwrap();

  s.insert_assignment(new_assignment(&case, &volunteer)).await.unwrap();
  s.insert_assignment(new_assignment(&case, &other)).await.unwrap();

  let by_case = s.list_assignments(AssignmentParent::Case(case.case_id)).await.unwrap();
  assert_eq!(by_case.len(), 2);

  let by_other = s
    .list_assignments(AssignmentParent::Volunteer(other.volunteer_id))
    .await
    .unwrap();
  assert_eq!(by_other.len(), 1);
  assert_eq!(by_other[0].volunteer_id, other.volunteer_id);
}

// ─── Deletion ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_assignment_removes_row() {
  let s = store().await;
  let (case, volunteer) = pair(&s, Uuid::new_v4()).await;
  let a = s.insert_assignment(new_assignment(&case, &volunteer)).await.unwrap();

  s.delete_assignment(a.assignment_id).await.unwrap();
  assert!(s.get_assignment(a.assignment_id).await.unwrap().is_none());
  assert!(matches!(
    s.delete_assignment(a.assignment_id).await,
    Err(Error::AssignmentNotFound(_))
  ));
}

// ─── Through the service ─────────────────────────────────────────────────────

#[tokio::test]
async fn service_reactivates_persisted_row() {
  let s = Arc::new(store().await);
  let org = Uuid::new_v4();
  let (case, volunteer) = pair(&s, org).await;
  let service = AssignmentService::new(Arc::clone(&s));
  let admin = Actor::new(Role::Admin, org);
  let request = AssignmentRequest { case, volunteer, mode: EntryMode::VolunteerDriven };

  let created = service.create_or_reactivate(&request, &admin).await.unwrap();
  service.deactivate(&created.assignment, &admin).await.unwrap();

  let again = service.create_or_reactivate(&request, &admin).await.unwrap();
  assert!(again.reactivated);
  assert_eq!(again.assignment.assignment_id, created.assignment.assignment_id);
  assert!(again.assignment.active);

  let rows = s
    .list_assignments(AssignmentParent::Volunteer(request.volunteer.volunteer_id))
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
}
