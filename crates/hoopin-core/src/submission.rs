//! Submission types — the one entity this system moves around.
//!
//! [`RawSubmission`] is what arrives on the wire, with every field optional.
//! [`RawSubmission::validate`] turns it into a [`Submission`], which is what
//! the client sends and what the endpoint converts into a [`WaitlistRow`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  error::ValidationError,
  row::{DIRECT_REFERRER, UNKNOWN_USER_AGENT, WaitlistRow, format_timestamp},
  validate::{FieldKind, is_valid_email},
};

// ─── Wire shape ──────────────────────────────────────────────────────────────

/// A submission as received, before any checks.
///
/// Deserialises from both a JSON object and a form-encoded body; keys are
/// `name`, `email`, `society`, `city`, `workplace`, `timestamp`, `userAgent`
/// and `referrer`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
  pub name:       Option<String>,
  pub email:      Option<String>,
  pub society:    Option<String>,
  pub city:       Option<String>,
  pub workplace:  Option<String>,
  pub timestamp:  Option<String>,
  pub user_agent: Option<String>,
  pub referrer:   Option<String>,
}

impl RawSubmission {
  pub fn field(&self, kind: FieldKind) -> Option<&str> {
    match kind {
      FieldKind::Name => self.name.as_deref(),
      FieldKind::Email => self.email.as_deref(),
      FieldKind::Society => self.society.as_deref(),
      FieldKind::City => self.city.as_deref(),
      FieldKind::Workplace => self.workplace.as_deref(),
    }
  }

  /// Authoritative boundary checks: presence first, then email shape.
  ///
  /// A required field that is absent or whitespace-only is reported as
  /// [`ValidationError::MissingFields`]; only when all five are present is the
  /// email pattern applied. Values are kept exactly as received.
  pub fn validate(self) -> Result<Submission, ValidationError> {
    let missing = FieldKind::ALL
      .iter()
      .any(|&kind| self.field(kind).is_none_or(|v| v.trim().is_empty()));
    if missing {
      return Err(ValidationError::MissingFields);
    }

    let Self {
      name: Some(name),
      email: Some(email),
      society: Some(society),
      city: Some(city),
      workplace: Some(workplace),
      timestamp,
      user_agent,
      referrer,
    } = self
    else {
      return Err(ValidationError::MissingFields);
    };

    if !is_valid_email(&email) {
      return Err(ValidationError::InvalidEmail);
    }

    Ok(Submission {
      name,
      email,
      society,
      city,
      workplace,
      timestamp,
      user_agent,
      referrer,
    })
  }
}

// ─── Validated submission ────────────────────────────────────────────────────

/// A submission whose five required fields have passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
  pub name:       String,
  pub email:      String,
  pub society:    String,
  pub city:       String,
  pub workplace:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_agent: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub referrer:   Option<String>,
}

impl Submission {
  /// Lay the submission out as a table row.
  ///
  /// Absent or empty metadata is filled in: the timestamp from `now`, the
  /// user agent with [`UNKNOWN_USER_AGENT`], the referrer with
  /// [`DIRECT_REFERRER`].
  pub fn into_row(self, now: DateTime<Utc>) -> WaitlistRow {
    WaitlistRow {
      name:       self.name,
      email:      self.email,
      society:    self.society,
      city:       self.city,
      workplace:  self.workplace,
      timestamp:  non_empty(self.timestamp)
        .unwrap_or_else(|| format_timestamp(now)),
      user_agent: non_empty(self.user_agent)
        .unwrap_or_else(|| UNKNOWN_USER_AGENT.to_owned()),
      referrer:   non_empty(self.referrer)
        .unwrap_or_else(|| DIRECT_REFERRER.to_owned()),
    }
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}
