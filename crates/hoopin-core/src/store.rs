//! The `WaitlistStore` trait.
//!
//! Implemented by storage backends (e.g. `hoopin-store-sqlite`). The intake
//! endpoint depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::row::WaitlistRow;

/// An append-only table of waitlist rows.
///
/// The request path only ever appends. Reads, clears and exports are operator
/// concerns and live on the concrete backend.
///
/// Writes must be serialised by the backend so that concurrent appends never
/// interleave into a partial row.
pub trait WaitlistStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one row at the end of the table.
  fn append(
    &self,
    row: WaitlistRow,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
