//! SQL schema for the waitlist table.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per accepted submission, columns in header order.
-- The request path only ever INSERTs.
CREATE TABLE IF NOT EXISTS waitlist (
    row_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    society     TEXT NOT NULL,
    city        TEXT NOT NULL,
    workplace   TEXT NOT NULL,
    timestamp   TEXT NOT NULL,   -- ISO 8601, as submitted or server-assigned
    user_agent  TEXT NOT NULL,
    referrer    TEXT NOT NULL
);

PRAGMA user_version = 1;
";

/// Column list shared by the INSERT and SELECT statements.
pub const COLUMNS: &str =
  "name, email, society, city, workplace, timestamp, user_agent, referrer";
