//! Response bodies shared by the endpoint and the client.

use serde::{Deserialize, Serialize};

/// Shown to a visitor whose submission was accepted.
pub const JOINED_MESSAGE: &str = "Successfully joined the Hoopin community!";

/// Body of every `POST` response: `{success, message?, error?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
}

impl SubmitResponse {
  pub fn accepted() -> Self {
    Self { success: true, message: Some(JOINED_MESSAGE.to_owned()), error: None }
  }

  pub fn rejected(reason: impl Into<String>) -> Self {
    Self { success: false, message: None, error: Some(reason.into()) }
  }
}

/// Body of the liveness query: `{message, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
  pub message:   String,
  pub timestamp: String,
}
