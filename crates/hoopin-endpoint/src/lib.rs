//! Intake endpoint for the Hoopin waitlist.
//!
//! Exposes an axum [`Router`] that validates submissions and appends them to
//! any [`WaitlistStore`].
//!
//! | Method    | Path | Notes |
//! |-----------|------|-------|
//! | `POST`    | `/`  | JSON or form-encoded submission |
//! | `GET`     | `/`  | Liveness: `{"message":...,"timestamp":...}` |
//! | `OPTIONS` | any  | CORS preflight, empty body |

pub mod cors;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  extract::{DefaultBodyLimit, Request},
  http::{Method, StatusCode},
  middleware,
  response::{IntoResponse, Response},
  routing::get,
};
use hoopin_core::{response::SubmitResponse, store::WaitlistStore};
use serde::Deserialize;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use handlers::{preflight, query, submit};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which request bodies `POST /` accepts.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
  /// `application/json` only.
  Json,
  /// `application/json` or `application/x-www-form-urlencoded`.
  #[default]
  JsonOrForm,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `HOOPIN_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store_path:  PathBuf,
  #[serde(default)]
  pub body_format: BodyFormat,
  /// Largest request body accepted, in bytes. Unlimited when unset.
  #[serde(default)]
  pub body_limit:  Option<usize>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: WaitlistStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the intake endpoint.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: WaitlistStore + Clone + Send + Sync + 'static,
{
  let body_limit = match state.config.body_limit {
    Some(bytes) => DefaultBodyLimit::max(bytes),
    None => DefaultBodyLimit::disable(),
  };

  Router::new()
    .route(
      "/",
      get(query::handler)
        .post(submit::handler::<S>)
        .options(preflight::handler),
    )
    .fallback(fallback)
    .layer(body_limit)
    .layer(CatchPanicLayer::custom(error::panic_response))
    .layer(middleware::map_response(cors::apply))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Preflight on unknown paths still succeeds; anything else is a 404.
async fn fallback(req: Request) -> Response {
  if req.method() == Method::OPTIONS {
    return preflight::handler().await;
  }
  (
    StatusCode::NOT_FOUND,
    Json(SubmitResponse::rejected("Not found")),
  )
    .into_response()
}

// ─── Integration tests ────────────────────────────────────────────────────────
