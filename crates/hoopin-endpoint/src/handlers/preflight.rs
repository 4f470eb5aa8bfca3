//! OPTIONS handler — answers CORS negotiation without touching the body.

use axum::{
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};

use crate::cors::{
  ALLOW_METHODS, ALLOW_ORIGIN, PREFLIGHT_ALLOW_HEADERS, PREFLIGHT_MAX_AGE,
};

pub async fn handler() -> Response {
  (
    StatusCode::NO_CONTENT,
    [
      (header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
      (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
      (header::ACCESS_CONTROL_ALLOW_HEADERS, PREFLIGHT_ALLOW_HEADERS),
      (header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE),
    ],
  )
    .into_response()
}
