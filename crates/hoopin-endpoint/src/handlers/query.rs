//! GET handler — liveness check.

use axum::Json;
use chrono::Utc;
use hoopin_core::{response::StatusResponse, row::format_timestamp};

pub const RUNNING_MESSAGE: &str = "Hoopin Waitlist API is running";

pub async fn handler() -> Json<StatusResponse> {
  Json(StatusResponse {
    message:   RUNNING_MESSAGE.to_owned(),
    timestamp: format_timestamp(Utc::now()),
  })
}
