//! The persisted row layout of the waitlist table.

use chrono::{DateTime, SecondsFormat, Utc};

/// Written to the User Agent column when the submission carries none.
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// Written to the Referrer column when the submission carries none.
pub const DIRECT_REFERRER: &str = "Direct";

/// One accepted submission as it lands in the table.
///
/// Field order is column order; see [`WaitlistRow::HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistRow {
  pub name:       String,
  pub email:      String,
  pub society:    String,
  pub city:       String,
  pub workplace:  String,
  pub timestamp:  String,
  pub user_agent: String,
  pub referrer:   String,
}

impl WaitlistRow {
  /// The fixed header row of the table.
  pub const HEADER: [&'static str; 8] = [
    "Name",
    "Email",
    "Society",
    "City",
    "Workplace",
    "Timestamp",
    "User Agent",
    "Referrer",
  ];

  /// Borrow the eight columns in header order.
  pub fn to_columns(&self) -> [&str; 8] {
    [
      &self.name,
      &self.email,
      &self.society,
      &self.city,
      &self.workplace,
      &self.timestamp,
      &self.user_agent,
      &self.referrer,
    ]
  }

  /// Rebuild a row from columns in header order.
  pub fn from_columns(columns: [String; 8]) -> Self {
    let [name, email, society, city, workplace, timestamp, user_agent, referrer] =
      columns;
    Self { name, email, society, city, workplace, timestamp, user_agent, referrer }
  }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2025-01-01T10:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
