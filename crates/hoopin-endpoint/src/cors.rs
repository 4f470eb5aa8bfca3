//! Cross-origin headers.
//!
//! [`apply`] runs over every response the router produces, so success,
//! rejection, server error and fallback all carry the same allowances.
//! Headers a handler already set are left alone, which lets the preflight
//! response advertise its wider header list.

use axum::{
  http::{HeaderName, HeaderValue, header},
  response::Response,
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Allowed request headers advertised during preflight.
pub const PREFLIGHT_ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// How long, in seconds, a browser may cache the preflight result.
pub const PREFLIGHT_MAX_AGE: &str = "86400";

const RESPONSE_HEADERS: [(HeaderName, &str); 3] = [
  (header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
  (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
  (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
];

/// Response mapper installed with `axum::middleware::map_response`.
pub async fn apply(mut res: Response) -> Response {
  let headers = res.headers_mut();
  for (name, value) in RESPONSE_HEADERS {
    headers
      .entry(name)
      .or_insert(HeaderValue::from_static(value));
  }
  res
}
