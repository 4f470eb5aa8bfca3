//! The waitlist form: inline validation and submission.
//!
//! [`IntakeForm`] owns everything it touches (the client and the metadata it
//! stamps onto each submission); callers pass the field values in.

use std::fmt;

use chrono::Utc;
use hoopin_core::{
  response::JOINED_MESSAGE,
  row::{DIRECT_REFERRER, format_timestamp},
  submission::Submission,
  validate::FieldKind,
};
use thiserror::Error;

use crate::client::{GENERIC_FAILURE, IntakeClient, TransportError};

pub use hoopin_core::validate::validate_field;

// ─── Field values ────────────────────────────────────────────────────────────

/// The five values a visitor types in, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
  pub name:      String,
  pub email:     String,
  pub society:   String,
  pub city:      String,
  pub workplace: String,
}

impl FormFields {
  pub fn get(&self, kind: FieldKind) -> &str {
    match kind {
      FieldKind::Name => &self.name,
      FieldKind::Email => &self.email,
      FieldKind::Society => &self.society,
      FieldKind::City => &self.city,
      FieldKind::Workplace => &self.workplace,
    }
  }

  pub fn set(&mut self, kind: FieldKind, value: String) {
    match kind {
      FieldKind::Name => self.name = value,
      FieldKind::Email => self.email = value,
      FieldKind::Society => self.society = value,
      FieldKind::City => self.city = value,
      FieldKind::Workplace => self.workplace = value,
    }
  }

  fn trimmed(&self) -> Self {
    Self {
      name:      self.name.trim().to_owned(),
      email:     self.email.trim().to_owned(),
      society:   self.society.trim().to_owned(),
      city:      self.city.trim().to_owned(),
      workplace: self.workplace.trim().to_owned(),
    }
  }
}

// ─── Field errors ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
  /// Nothing left after trimming.
  Missing,
  /// Present but fails the field's predicate.
  Invalid,
}

/// An inline message attached to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
  pub field:   FieldKind,
  pub problem: FieldProblem,
}

impl FieldError {
  pub fn message(&self) -> &'static str {
    use FieldKind::*;
    use FieldProblem::*;
    match (self.field, self.problem) {
      (Name, Missing) => "Full name is required",
      (Name, Invalid) => "Please enter your full name",
      (Email, Missing) => "Email address is required",
      (Email, Invalid) => "Please enter a valid email address",
      (Society, Missing) => "Society/apartment name is required",
      (Society, Invalid) => "Please enter your society/apartment name",
      (City, Missing) => "City is required",
      (City, Invalid) => "Please enter a valid city name",
      (Workplace, Missing) => "Workplace is required",
      (Workplace, Invalid) => "Please enter your workplace",
    }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field.key(), self.message())
  }
}

/// The check run when a field loses focus.
///
/// An empty field is left alone until submit; a non-empty one that fails its
/// predicate gets its "invalid" message.
pub fn check_field(kind: FieldKind, value: &str) -> Option<FieldError> {
  (!value.is_empty() && !validate_field(kind, value)).then_some(FieldError {
    field:   kind,
    problem: FieldProblem::Invalid,
  })
}

/// Trim every field and run every check, collecting all failures.
pub fn validate(fields: &FormFields) -> Result<FormFields, Vec<FieldError>> {
  let trimmed = fields.trimmed();
  let errors: Vec<_> = FieldKind::ALL
    .into_iter()
    .filter_map(|kind| {
      let value = trimmed.get(kind);
      let problem = if value.is_empty() {
        FieldProblem::Missing
      } else if !validate_field(kind, value) {
        FieldProblem::Invalid
      } else {
        return None;
      };
      Some(FieldError { field: kind, problem })
    })
    .collect();

  if errors.is_empty() { Ok(trimmed) } else { Err(errors) }
}

// ─── Submission ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SubmitError {
  /// One or more fields failed validation; nothing was sent.
  #[error("{} invalid field(s)", .0.len())]
  Invalid(Vec<FieldError>),
  /// The endpoint answered but refused the submission.
  #[error("rejected by endpoint: {0}")]
  Rejected(String),
  #[error(transparent)]
  Transport(#[from] TransportError),
}

impl SubmitError {
  /// The lines shown to the visitor, each as `field: message`.
  pub fn messages(&self) -> Vec<String> {
    match self {
      SubmitError::Invalid(errors) => {
        errors.iter().map(ToString::to_string).collect()
      }
      // Endpoint and transport failures read the same to the visitor.
      SubmitError::Rejected(_) | SubmitError::Transport(_) => {
        vec![format!("{}: {GENERIC_FAILURE}", FieldKind::Email.key())]
      }
    }
  }
}

/// The form, bound to an endpoint and the metadata it reports.
pub struct IntakeForm {
  client:     IntakeClient,
  user_agent: String,
  referrer:   Option<String>,
}

impl IntakeForm {
  pub fn new(
    client: IntakeClient,
    user_agent: impl Into<String>,
    referrer: Option<String>,
  ) -> Self {
    Self { client, user_agent: user_agent.into(), referrer }
  }

  /// Validate `fields` and, only if every field passes, send them.
  ///
  /// Returns the confirmation message to show in place of the form.
  pub async fn submit(&self, fields: &FormFields) -> Result<String, SubmitError> {
    let fields = validate(fields).map_err(SubmitError::Invalid)?;
    let submission = self.build(fields);

    let resp = self.client.submit(&submission).await?;
    if resp.success {
      Ok(resp.message.unwrap_or_else(|| JOINED_MESSAGE.to_owned()))
    } else {
      let reason = resp.error.unwrap_or_else(|| "Submission failed".to_owned());
      tracing::debug!(%reason, "endpoint rejected submission");
      Err(SubmitError::Rejected(reason))
    }
  }

  fn build(&self, fields: FormFields) -> Submission {
    let FormFields { name, email, society, city, workplace } = fields;
    Submission {
      name,
      email,
      society,
      city,
      workplace,
      timestamp: Some(format_timestamp(Utc::now())),
      user_agent: Some(self.user_agent.clone()),
      referrer: Some(
        self
          .referrer
          .clone()
          .filter(|r| !r.is_empty())
          .unwrap_or_else(|| DIRECT_REFERRER.to_owned()),
      ),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;
  use crate::testing::{Reply, ScriptedServer, serve};
  use hoopin_endpoint::{AppState, BodyFormat, ServerConfig};
  use hoopin_store_sqlite::SqliteStore;
  use tokio::net::TcpListener;
  use tracing::{Event, Level, Subscriber};
  use tracing_subscriber::layer::{Context, Layer, SubscriberExt as _};

  /// Counts events at `WARN` or above, which a default `hoopin` run prints.
  #[derive(Clone, Default)]
  struct Audible(Arc<AtomicUsize>);

  impl<S: Subscriber> Layer<S> for Audible {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
      if *event.metadata().level() <= Level::WARN {
        self.0.fetch_add(1, Ordering::SeqCst);
      }
    }
  }

  fn ann() -> FormFields {
    FormFields {
      name:      "Ann Lee".into(),
      email:     "ann@x.com".into(),
      society:   "Oak Apts".into(),
      city:      "Pune".into(),
      workplace: "Acme".into(),
    }
  }

  fn form(url: &str) -> IntakeForm {
    IntakeForm::new(IntakeClient::new(url).unwrap(), "hoopin-cli/test", None)
  }

  // ── Validation ──────────────────────────────────────────────────────────────

  #[test]
  fn every_failing_field_is_reported() {
    let fields = FormFields {
      name:      " A ".into(),
      email:     "not-an-email".into(),
      society:   "".into(),
      city:      "   ".into(),
      workplace: "Acme".into(),
    };
    let errors = validate(&fields).unwrap_err();
    let messages: Vec<_> = errors.iter().map(FieldError::message).collect();
    assert_eq!(messages, [
      "Please enter your full name",
      "Please enter a valid email address",
      "Society/apartment name is required",
      "City is required",
    ]);
  }

  #[test]
  fn validation_trims_values() {
    let fields = FormFields {
      name: "  Ann Lee  ".into(),
      email: " ann@x.com ".into(),
      ..ann()
    };
    let ok = validate(&fields).unwrap();
    assert_eq!(ok.name, "Ann Lee");
    assert_eq!(ok.email, "ann@x.com");
  }

  #[test]
  fn blur_check_ignores_empty_fields() {
    assert_eq!(check_field(FieldKind::Email, ""), None);
    assert_eq!(check_field(FieldKind::Email, "ann@x.com"), None);
    let err = check_field(FieldKind::Email, "ann@").unwrap();
    assert_eq!(err.problem, FieldProblem::Invalid);
    assert_eq!(err.to_string(), "email: Please enter a valid email address");
  }

  // ── Submission ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn invalid_fields_make_no_request() {
    let server = ScriptedServer::start(vec![Reply::Accept]).await;
    let fields = FormFields { city: "P".into(), ..ann() };

    let err = form(server.url()).submit(&fields).await.unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(ref e) if e.len() == 1));
    assert_eq!(server.hits(), 0);
  }

  #[tokio::test]
  async fn submission_carries_trimmed_fields_and_metadata() {
    let server = ScriptedServer::start(vec![Reply::Accept]).await;
    let fields = FormFields { name: " Ann Lee ".into(), ..ann() };

    let msg = form(server.url()).submit(&fields).await.unwrap();
    assert_eq!(msg, "Successfully joined the Hoopin community!");

    let seen = server.requests();
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["name"], "Ann Lee");
    assert_eq!(body["userAgent"], "hoopin-cli/test");
    assert_eq!(body["referrer"], "Direct");
    let ts = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "{ts}");
  }

  #[tokio::test]
  async fn endpoint_rejection_is_surfaced() {
    let server =
      ScriptedServer::start(vec![Reply::Reject("Invalid email format")]).await;
    let err = form(server.url()).submit(&ann()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Rejected(ref r) if r == "Invalid email format"));
    assert_eq!(err.messages(), [
      "email: Something went wrong. Please try again."
    ]);
  }

  #[tokio::test]
  async fn transport_failure_is_opaque() {
    let server =
      ScriptedServer::start(vec![Reply::Status(500), Reply::Status(500)]).await;
    let err = form(server.url()).submit(&ann()).await.unwrap_err();
    assert_eq!(err.to_string(), GENERIC_FAILURE);
    assert_eq!(server.hits(), 2);
  }

  #[tokio::test]
  async fn transport_failure_shows_only_the_generic_line() {
    let audible = Audible::default();
    let _guard = tracing::subscriber::set_default(
      tracing_subscriber::registry().with(audible.clone()),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = form(&format!("http://{addr}/"))
      .submit(&ann())
      .await
      .unwrap_err();
    assert!(matches!(err, SubmitError::Transport(_)));
    assert_eq!(err.messages(), [
      "email: Something went wrong. Please try again."
    ]);
    assert_eq!(audible.0.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn invalid_fields_render_one_line_each() {
    let fields = FormFields { name: "".into(), city: "P".into(), ..ann() };
    let err = SubmitError::Invalid(validate(&fields).unwrap_err());
    assert_eq!(err.messages(), [
      "name: Full name is required",
      "city: Please enter a valid city name",
    ]);
  }

  // ── End to end ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submission_lands_as_one_row_in_the_endpoint_store() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let state = AppState {
      store:  store.clone(),
      config: Arc::new(ServerConfig {
        host:        "127.0.0.1".into(),
        port:        0,
        store_path:  ":memory:".into(),
        body_format: BodyFormat::Json,
        body_limit:  None,
      }),
    };
    let url = serve(hoopin_endpoint::router(state)).await;

    let form = IntakeForm::new(
      IntakeClient::new(&url).unwrap(),
      "hoopin-cli/test",
      Some("https://friend.example/".into()),
    );
    form.submit(&ann()).await.unwrap();

    let rows = store.rows().await.unwrap();
    assert_eq!(rows.len(), 1);
    let cols = rows[0].to_columns();
    assert_eq!(cols[..5], ["Ann Lee", "ann@x.com", "Oak Apts", "Pune", "Acme"]);
    assert_eq!(cols[6..], ["hoopin-cli/test", "https://friend.example/"]);
  }
}
