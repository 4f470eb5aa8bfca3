//! POST handler — validate a submission and append it to the waitlist.

use axum::{
  Form, Json,
  extract::{FromRequest, Request, State},
  http::{StatusCode, header},
};
use chrono::Utc;
use hoopin_core::{
  response::SubmitResponse, store::WaitlistStore, submission::RawSubmission,
};

use crate::{AppState, BodyFormat, error::Error};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  req: Request,
) -> Result<Json<SubmitResponse>, Error>
where
  S: WaitlistStore + Clone + Send + Sync + 'static,
{
  let raw = parse_body(req, state.config.body_format).await?;
  let submission = raw.validate()?;

  let row = submission.into_row(Utc::now());
  let email = row.email.clone();
  state
    .store
    .append(row)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(%email, "joined waitlist");
  Ok(Json(SubmitResponse::accepted()))
}

/// Decode the body as JSON, or as a form when `format` allows it.
///
/// The choice is made from `Content-Type` alone: a JSON media type always
/// goes to the JSON decoder, anything else goes to the form decoder, which
/// in turn refuses bodies that are not `application/x-www-form-urlencoded`.
async fn parse_body(
  req: Request,
  format: BodyFormat,
) -> Result<RawSubmission, Error> {
  let is_json = req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(is_json_content_type);

  if is_json {
    let Json(raw) = Json::<RawSubmission>::from_request(req, &())
      .await
      .map_err(|e| body_error(e.status(), e.body_text()))?;
    return Ok(raw);
  }

  match format {
    BodyFormat::Json => Err(Error::BadRequest(
      "expected an application/json body".to_string(),
    )),
    BodyFormat::JsonOrForm => {
      let Form(raw) = Form::<RawSubmission>::from_request(req, &())
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?;
      Ok(raw)
    }
  }
}

/// Oversized bodies keep their own status; every other extractor rejection
/// is a parse failure.
fn body_error(status: StatusCode, detail: String) -> Error {
  if status == StatusCode::PAYLOAD_TOO_LARGE {
    Error::TooLarge(detail)
  } else {
    Error::BadRequest(detail)
  }
}

fn is_json_content_type(value: &str) -> bool {
  let essence = value.split(';').next().unwrap_or_default().trim();
  essence.eq_ignore_ascii_case("application/json")
    || essence
      .rsplit_once('+')
      .is_some_and(|(_, suffix)| suffix.eq_ignore_ascii_case("json"))
}
