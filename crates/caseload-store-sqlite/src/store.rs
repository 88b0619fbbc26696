//! [`SqliteStore`] — the SQLite implementation of [`AssignmentStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use caseload_core::{
  assignment::{
    Assignment, AssignmentParent, Case, LookupKey, NewAssignment, Volunteer,
  },
  store::AssignmentStore,
};

use crate::{
  encode::{
    ASSIGNMENT_SELECT, RawAssignment, RawCase, RawVolunteer, decode_uuid,
    encode_dt, encode_uuid, key_column, parent_column,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Caseload store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }

  /// Update a single flag column and return the re-read row.
  async fn set_flag(&self, id: Uuid, column: &'static str, value: bool) -> Result<Assignment> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "UPDATE case_assignments SET {column} = ?2, updated_at = ?3
           WHERE assignment_id = ?1"
        );
        Ok(conn.execute(&sql, rusqlite::params![id_str, value, at_str])?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::AssignmentNotFound(id));
    }

    self
      .get_assignment(id)
      .await?
      .ok_or(Error::AssignmentNotFound(id))
  }
}

// ─── AssignmentStore impl ────────────────────────────────────────────────────

impl AssignmentStore for SqliteStore {
  type Error = Error;

  // ── Referenced entities ───────────────────────────────────────────────────

  async fn add_case(&self, organization_id: Uuid, case_number: String) -> Result<Case> {
    let case = Case { case_id: Uuid::new_v4(), organization_id, case_number };

    let id_str  = encode_uuid(case.case_id);
    let org_str = encode_uuid(organization_id);
    let number  = case.case_number.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cases (case_id, organization_id, case_number) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, org_str, number],
        )?;
        Ok(())
      })
      .await?;

    Ok(case)
  }

  async fn add_volunteer(
    &self,
    organization_id: Uuid,
    display_name: String,
  ) -> Result<Volunteer> {
    let volunteer =
      Volunteer { volunteer_id: Uuid::new_v4(), organization_id, display_name };

    let id_str  = encode_uuid(volunteer.volunteer_id);
    let org_str = encode_uuid(organization_id);
    let name    = volunteer.display_name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO volunteers (volunteer_id, organization_id, display_name)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, org_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(volunteer)
  }

  async fn get_case(&self, id: Uuid) -> Result<Option<Case>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT case_id, organization_id, case_number FROM cases WHERE case_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawCase {
                case_id:         row.get(0)?,
                organization_id: row.get(1)?,
                case_number:     row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn get_volunteer(&self, id: Uuid) -> Result<Option<Volunteer>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawVolunteer> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT volunteer_id, organization_id, display_name
             FROM volunteers WHERE volunteer_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawVolunteer {
                volunteer_id:    row.get(0)?,
                organization_id: row.get(1)?,
                display_name:    row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawVolunteer::into_volunteer).transpose()
  }

  // ── Assignments — reads ───────────────────────────────────────────────────

  async fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        let sql = format!("{ASSIGNMENT_SELECT} WHERE a.assignment_id = ?1");
        Ok(conn
          .query_row(&sql, rusqlite::params![id_str], RawAssignment::from_row)
          .optional()?)
      })
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn find_inactive(
    &self,
    parent: AssignmentParent,
    key: LookupKey,
  ) -> Result<Option<Assignment>> {
    let (parent_col, parent_id) = parent_column(parent);
    let (key_col, key_id)       = key_column(key);

    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "{ASSIGNMENT_SELECT}
           WHERE a.active = 0 AND a.{parent_col} = ?1 AND a.{key_col} = ?2
           ORDER BY a.created_at, a.rowid
           LIMIT 1"
        );
        Ok(conn
          .query_row(
            &sql,
            rusqlite::params![parent_id, key_id],
            RawAssignment::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn list_assignments(&self, parent: AssignmentParent) -> Result<Vec<Assignment>> {
    let (parent_col, parent_id) = parent_column(parent);

    let raws: Vec<RawAssignment> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "{ASSIGNMENT_SELECT}
           WHERE a.{parent_col} = ?1
           ORDER BY a.created_at, a.rowid"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![parent_id], RawAssignment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssignment::into_assignment).collect()
  }

  // ── Assignments — writes ──────────────────────────────────────────────────

  async fn insert_assignment(&self, input: NewAssignment) -> Result<Assignment> {
    let now = Utc::now();
    let assignment_id = Uuid::new_v4();

    let id_str        = encode_uuid(assignment_id);
    let case_str      = encode_uuid(input.case_id);
    let volunteer_str = encode_uuid(input.volunteer_id);
    let at_str        = encode_dt(now);

    // Existence checks and the insert share one closure so the messages
    // describe the state the insert saw.
    let outcome: std::result::Result<String, Vec<String>> = self
      .conn
      .call(move |conn| {
        let org: Option<String> = conn
          .query_row(
            "SELECT organization_id FROM cases WHERE case_id = ?1",
            rusqlite::params![case_str],
            |r| r.get(0),
          )
          .optional()?;

        let volunteer_exists: bool = conn
          .query_row(
            "SELECT 1 FROM volunteers WHERE volunteer_id = ?1",
            rusqlite::params![volunteer_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        let mut messages = Vec::new();
        if org.is_none() {
          messages.push("Case must exist".to_string());
        }
        if !volunteer_exists {
          messages.push("Volunteer must exist".to_string());
        }
        let Some(org) = org.filter(|_| messages.is_empty()) else {
          return Ok(Err(messages));
        };

        conn.execute(
          "INSERT INTO case_assignments (
             assignment_id, case_id, volunteer_id,
             active, hide_old_contacts, created_at, updated_at
           ) VALUES (?1, ?2, ?3, 1, 0, ?4, ?4)",
          rusqlite::params![id_str, case_str, volunteer_str, at_str],
        )?;
        Ok(Ok(org))
      })
      .await?;

    let organization_id = decode_uuid(&outcome.map_err(Error::Validation)?)?;

    Ok(Assignment {
      assignment_id,
      case_id: input.case_id,
      volunteer_id: input.volunteer_id,
      organization_id,
      active: true,
      hide_old_contacts: false,
      created_at: now,
      updated_at: now,
    })
  }

  async fn set_active(&self, id: Uuid, active: bool) -> Result<Assignment> {
    self.set_flag(id, "active", active).await
  }

  async fn set_hide_old_contacts(&self, id: Uuid, hide: bool) -> Result<Assignment> {
    self.set_flag(id, "hide_old_contacts", hide).await
  }

  async fn delete_assignment(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM case_assignments WHERE assignment_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::AssignmentNotFound(id));
    }
    tracing::debug!(assignment_id = %id, "assignment row deleted");
    Ok(())
  }
}
