//! Field predicates shared by the client form and the intake endpoint.

use std::sync::LazyLock;

use regex::Regex;

/// One `@`, at least one `.` after it, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Minimum trimmed length, in characters, of every free-text field.
pub const MIN_TEXT_LEN: usize = 2;

/// The five required fields of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
  Name,
  Email,
  Society,
  City,
  Workplace,
}

impl FieldKind {
  /// All required fields, in column order.
  pub const ALL: [Self; 5] = [
    Self::Name,
    Self::Email,
    Self::Society,
    Self::City,
    Self::Workplace,
  ];

  /// The key used on the wire (JSON property or form field name).
  pub fn key(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Society => "society",
      Self::City => "city",
      Self::Workplace => "workplace",
    }
  }
}

/// Pure predicate for a single field value.
///
/// Email must match the `local@domain.tld` shape; every other field needs at
/// least [`MIN_TEXT_LEN`] characters once surrounding whitespace is removed.
/// There is no upper bound and no character-set restriction.
pub fn validate_field(kind: FieldKind, value: &str) -> bool {
  match kind {
    FieldKind::Email => is_valid_email(value),
    FieldKind::Name | FieldKind::Society | FieldKind::City | FieldKind::Workplace => {
      value.trim().chars().count() >= MIN_TEXT_LEN
    }
  }
}

pub fn is_valid_email(value: &str) -> bool { EMAIL_PATTERN.is_match(value) }
