//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Flags are stored as `INTEGER` 0/1.

use caseload_core::assignment::{
  Assignment, AssignmentParent, Case, LookupKey, Volunteer,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Anchors ─────────────────────────────────────────────────────────────────

/// The `case_assignments` column and encoded id a parent anchors on.
pub fn parent_column(parent: AssignmentParent) -> (&'static str, String) {
  match parent {
    AssignmentParent::Case(id) => ("case_id", encode_uuid(id)),
    AssignmentParent::Volunteer(id) => ("volunteer_id", encode_uuid(id)),
  }
}

/// The `case_assignments` column and encoded id a lookup key matches.
pub fn key_column(key: LookupKey) -> (&'static str, String) {
  match key {
    LookupKey::Case(id) => ("case_id", encode_uuid(id)),
    LookupKey::Volunteer(id) => ("volunteer_id", encode_uuid(id)),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Columns selected for every assignment read; the organization comes from
/// the joined case.
pub const ASSIGNMENT_SELECT: &str = "
  SELECT a.assignment_id, a.case_id, a.volunteer_id, c.organization_id,
         a.active, a.hide_old_contacts, a.created_at, a.updated_at
  FROM case_assignments a
  JOIN cases c ON c.case_id = a.case_id";

/// Raw values read directly from a `case_assignments` row joined with `cases`.
pub struct RawAssignment {
  pub assignment_id:     String,
  pub case_id:           String,
  pub volunteer_id:      String,
  pub organization_id:   String,
  pub active:            bool,
  pub hide_old_contacts: bool,
  pub created_at:        String,
  pub updated_at:        String,
}

impl RawAssignment {
  /// Map a row produced by [`ASSIGNMENT_SELECT`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      assignment_id:     row.get(0)?,
      case_id:           row.get(1)?,
      volunteer_id:      row.get(2)?,
      organization_id:   row.get(3)?,
      active:            row.get(4)?,
      hide_old_contacts: row.get(5)?,
      created_at:        row.get(6)?,
      updated_at:        row.get(7)?,
    })
  }

  pub fn into_assignment(self) -> Result<Assignment> {
    Ok(Assignment {
      assignment_id:     decode_uuid(&self.assignment_id)?,
      case_id:           decode_uuid(&self.case_id)?,
      volunteer_id:      decode_uuid(&self.volunteer_id)?,
      organization_id:   decode_uuid(&self.organization_id)?,
      active:            self.active,
      hide_old_contacts: self.hide_old_contacts,
      created_at:        decode_dt(&self.created_at)?,
      updated_at:        decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `cases` row.
pub struct RawCase {
  pub case_id:         String,
  pub organization_id: String,
  pub case_number:     String,
}

impl RawCase {
  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      case_id:         decode_uuid(&self.case_id)?,
      organization_id: decode_uuid(&self.organization_id)?,
      case_number:     self.case_number,
    })
  }
}

/// Raw strings read directly from a `volunteers` row.
pub struct RawVolunteer {
  pub volunteer_id:    String,
  pub organization_id: String,
  pub display_name:    String,
}

impl RawVolunteer {
  pub fn into_volunteer(self) -> Result<Volunteer> {
    Ok(Volunteer {
      volunteer_id:    decode_uuid(&self.volunteer_id)?,
      organization_id: decode_uuid(&self.organization_id)?,
      display_name:    self.display_name,
    })
  }
}
