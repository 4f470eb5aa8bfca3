//! A local HTTP server that replies from a script and records what it saw.

use std::sync::{Arc, Mutex};

use axum::{
  Json, Router,
  body::Bytes,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
  routing::post,
};
use hoopin_core::response::SubmitResponse;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub enum Reply {
  Accept,
  /// `200` with `{success:false}`.
  Reject(&'static str),
  /// `400` with `{success:false}`, as the intake endpoint rejects.
  Refuse(&'static str),
  Status(u16),
  Garbage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
  pub content_type: String,
  pub body:         String,
}

#[derive(Default)]
struct Shared {
  script: Vec<Reply>,
  seen:   Vec<Seen>,
}

/// Replies are consumed in order; once the script runs out every request
/// gets a 500.
pub struct ScriptedServer {
  url:    String,
  shared: Arc<Mutex<Shared>>,
}

impl ScriptedServer {
  pub async fn start(script: Vec<Reply>) -> Self {
    let shared = Arc::new(Mutex::new(Shared { script, seen: Vec::new() }));
    let app = Router::new()
      .route("/", post(reply))
      .with_state(shared.clone());
    let url = serve(app).await;
    Self { url, shared }
  }

  pub fn url(&self) -> &str { &self.url }

  pub fn hits(&self) -> usize { self.shared.lock().unwrap().seen.len() }

  pub fn requests(&self) -> Vec<Seen> { self.shared.lock().unwrap().seen.clone() }
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
  format!("http://{addr}/")
}

async fn reply(
  State(shared): State<Arc<Mutex<Shared>>>,
  headers: HeaderMap,
  body: Bytes,
) -> Response {
  let next = {
    let mut shared = shared.lock().unwrap();
    shared.seen.push(Seen {
      content_type: headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string(),
      body: String::from_utf8_lossy(&body).into_owned(),
    });
    if shared.script.is_empty() {
      Reply::Status(500)
    } else {
      shared.script.remove(0)
    }
  };

  match next {
    Reply::Accept => Json(SubmitResponse::accepted()).into_response(),
    Reply::Reject(reason) => Json(SubmitResponse::rejected(reason)).into_response(),
    Reply::Refuse(reason) => {
      (StatusCode::BAD_REQUEST, Json(SubmitResponse::rejected(reason)))
        .into_response()
    }
    Reply::Status(code) => StatusCode::from_u16(code).unwrap().into_response(),
    Reply::Garbage => (StatusCode::OK, "<html>oops</html>").into_response(),
  }
}
