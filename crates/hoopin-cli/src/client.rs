//! Async HTTP client for the intake endpoint.

use anyhow::{Context, Result, anyhow};
use hoopin_core::{response::SubmitResponse, submission::Submission};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// The only thing a visitor is told when the round trip fails.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Both attempts failed. The cause is logged at `debug`, not carried.
#[derive(Debug, Error)]
#[error("Something went wrong. Please try again.")]
pub struct TransportError;

/// Posts submissions to the intake endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct IntakeClient {
  client: Client,
  url:    String,
}

impl IntakeClient {
  pub fn new(url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, url: url.into() })
  }

  /// `POST <url>` with a JSON body, retried once on failure.
  ///
  /// A network error, a non-2xx status or an unparseable body triggers
  /// exactly one more identical request, immediately. A well-formed
  /// `{"success":false}` reply is returned as-is and not retried.
  pub async fn submit(
    &self,
    submission: &Submission,
  ) -> Result<SubmitResponse, TransportError> {
    match self.attempt(submission).await {
      Ok(resp) => return Ok(resp),
      Err(e) => tracing::debug!("submission failed, retrying once: {e:#}"),
    }

    self.attempt(submission).await.map_err(|e| {
      tracing::debug!("submission retry failed: {e:#}");
      TransportError
    })
  }

  async fn attempt(&self, submission: &Submission) -> Result<SubmitResponse> {
    tracing::debug!(url = %self.url, email = %submission.email, "posting submission");

    let resp = self
      .client
      .post(&self.url)
      .json(submission)
      .send()
      .await
      .with_context(|| format!("POST {} failed", self.url))?;

    let status = resp.status();
    if !status.is_success() {
      return Err(anyhow!("POST {} → {status}", self.url));
    }
    resp.json().await.context("deserialising submit response")
  }
}
