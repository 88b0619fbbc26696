//! SQL schema for the Caseload SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS cases (
    case_id          TEXT PRIMARY KEY,
    organization_id  TEXT NOT NULL,
    case_number      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS volunteers (
    volunteer_id     TEXT PRIMARY KEY,
    organization_id  TEXT NOT NULL,
    display_name     TEXT NOT NULL
);

-- The organization is not stored here; it is always read through the case.
-- No uniqueness on (case_id, volunteer_id): past assignments may repeat.
CREATE TABLE IF NOT EXISTS case_assignments (
    assignment_id     TEXT PRIMARY KEY,
    case_id           TEXT NOT NULL REFERENCES cases(case_id),
    volunteer_id      TEXT NOT NULL REFERENCES volunteers(volunteer_id),
    active            INTEGER NOT NULL DEFAULT 1,
    hide_old_contacts INTEGER NOT NULL DEFAULT 0,
    created_at        TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS case_assignments_case_idx      ON case_assignments(case_id);
CREATE INDEX IF NOT EXISTS case_assignments_volunteer_idx ON case_assignments(volunteer_id);

PRAGMA user_version = 1;
";
