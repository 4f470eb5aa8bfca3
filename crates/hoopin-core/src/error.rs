//! Error types for `hoopin-core`.

use thiserror::Error;

/// Why a submission was refused at the boundary.
///
/// The `Display` strings are the reasons sent back on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Missing required fields")]
  MissingFields,

  #[error("Invalid email format")]
  InvalidEmail,
}
