//! [`SqliteStore`] — the SQLite implementation of [`WaitlistStore`].

use std::path::Path;

use hoopin_core::{row::WaitlistRow, store::WaitlistStore};

use crate::{
  Result,
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The waitlist table backed by a single SQLite file.
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
    Ok(())
  }

  // ── Operator helpers ──────────────────────────────────────────────────────

  /// All rows in append order.
  pub async fn rows(&self) -> Result<Vec<WaitlistRow>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {COLUMNS} FROM waitlist ORDER BY row_id"))?;
        let rows = stmt
          .query_map([], |row| {
            Ok(WaitlistRow::from_columns([
              row.get(0)?,
              row.get(1)?,
              row.get(2)?,
              row.get(3)?,
              row.get(4)?,
              row.get(5)?,
              row.get(6)?,
              row.get(7)?,
            ]))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Number of rows currently in the table.
  pub async fn count(&self) -> Result<u64> {
    let count = self
      .conn
      .call(|conn| {
        let n: i64 =
          conn.query_row("SELECT COUNT(*) FROM waitlist", [], |r| r.get(0))?;
        Ok(n)
      })
      .await?;
    Ok(count.unsigned_abs())
  }

  /// Drop every row and restart the row counter, leaving only the header.
  pub async fn reset(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM waitlist", [])?;
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'waitlist'", [])?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── WaitlistStore impl ──────────────────────────────────────────────────────

impl WaitlistStore for SqliteStore {
  type Error = crate::Error;

  async fn append(&self, row: WaitlistRow) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO waitlist ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
          ),
          rusqlite::params![
            row.name,
            row.email,
            row.society,
            row.city,
            row.workplace,
            row.timestamp,
            row.user_agent,
            row.referrer,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
