//! Error types and axum `IntoResponse` implementation.
//!
//! Every failure renders as `{"success":false,"error":...}`. Store failures
//! never leak their detail to the caller; it goes to the log instead.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use hoopin_core::{ValidationError, response::SubmitResponse};
use thiserror::Error;

/// Reason reported for a body that could not be parsed at all.
pub const INVALID_BODY: &str = "Invalid request body";

/// Reason reported for a body over the configured size limit.
pub const TOO_LARGE: &str = "Request body too large";

/// Reason reported for any failure inside the server.
pub const SERVER_ERROR: &str = "Server error";

#[derive(Debug, Error)]
pub enum Error {
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("payload too large: {0}")]
  TooLarge(String),
  #[error(transparent)]
  Validation(#[from] ValidationError),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, reason) = match &self {
      Error::BadRequest(detail) => {
        tracing::warn!(%detail, "rejected unparseable submission");
        (StatusCode::BAD_REQUEST, INVALID_BODY.to_owned())
      }
      Error::TooLarge(detail) => {
        tracing::warn!(%detail, "rejected oversized submission");
        (StatusCode::PAYLOAD_TOO_LARGE, TOO_LARGE.to_owned())
      }
      Error::Validation(e) => {
        tracing::warn!(reason = %e, "rejected submission");
        (StatusCode::BAD_REQUEST, e.to_string())
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "failed to append waitlist row");
        (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_owned())
      }
    };
    (status, Json(SubmitResponse::rejected(reason))).into_response()
  }
}

/// Response for a handler that panicked; installed via `CatchPanicLayer`.
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
  tracing::error!("request handler panicked");
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(SubmitResponse::rejected(SERVER_ERROR)),
  )
    .into_response()
}
