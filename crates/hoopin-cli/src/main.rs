//! `hoopin` — join the Hoopin waitlist from a terminal.
//!
//! # Usage
//!
//! ```
//! hoopin --url http://localhost:8080/ --name "Ann Lee" --email ann@x.com \
//!        --society "Oak Apts" --city Pune --workplace Acme
//! hoopin --config ~/.config/hoopin/config.toml --interactive
//! ```

use std::{io::Write as _, path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use hoopin_cli::{
  client::IntakeClient,
  form::{FieldError, FormFields, IntakeForm, SubmitError, check_field},
};
use hoopin_core::validate::FieldKind;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080/";
const DEFAULT_RESET_DELAY_SECS: u64 = 10;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hoopin", version, about = "Join the Hoopin waitlist")]
struct Args {
  /// Path to a TOML config file (url, referrer, user_agent, reset_delay_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Intake endpoint URL (default: http://localhost:8080/).
  #[arg(long, env = "HOOPIN_URL")]
  url: Option<String>,

  #[arg(long)]
  name: Option<String>,

  #[arg(long)]
  email: Option<String>,

  /// Society or apartment name.
  #[arg(long)]
  society: Option<String>,

  #[arg(long)]
  city: Option<String>,

  #[arg(long)]
  workplace: Option<String>,

  /// Where the visitor came from (default: Direct).
  #[arg(long, env = "HOOPIN_REFERRER")]
  referrer: Option<String>,

  /// User agent reported with the submission.
  #[arg(long)]
  user_agent: Option<String>,

  /// Prompt for each field and keep the form open after each submission.
  #[arg(short, long)]
  interactive: bool,

  /// Seconds the confirmation stays up before the form comes back.
  #[arg(long, value_name = "SECS")]
  reset_delay: Option<u64>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:              String,
  referrer:         Option<String>,
  user_agent:       Option<String>,
  reset_delay_secs: Option<u64>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let url = args
    .url
    .clone()
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());
  let user_agent = args
    .user_agent
    .clone()
    .or(file_cfg.user_agent)
    .unwrap_or_else(|| concat!("hoopin-cli/", env!("CARGO_PKG_VERSION")).to_string());
  let referrer = args.referrer.clone().or(file_cfg.referrer);
  let reset_delay = Duration::from_secs(
    args
      .reset_delay
      .or(file_cfg.reset_delay_secs)
      .unwrap_or(DEFAULT_RESET_DELAY_SECS),
  );

  let form = IntakeForm::new(IntakeClient::new(url)?, user_agent, referrer);

  if args.interactive {
    run_interactive(&form, reset_delay).await?;
    return Ok(ExitCode::SUCCESS);
  }

  let fields = FormFields {
    name:      args.name.unwrap_or_default(),
    email:     args.email.unwrap_or_default(),
    society:   args.society.unwrap_or_default(),
    city:      args.city.unwrap_or_default(),
    workplace: args.workplace.unwrap_or_default(),
  };

  match form.submit(&fields).await {
    Ok(message) => {
      println!("{message}");
      Ok(ExitCode::SUCCESS)
    }
    Err(e) => {
      render_failure(&e);
      Ok(ExitCode::FAILURE)
    }
  }
}

// ─── Interactive form ─────────────────────────────────────────────────────────

/// Prompt, submit, confirm, and after `reset_delay` show a fresh form.
/// Ends at end of input.
async fn run_interactive(form: &IntakeForm, reset_delay: Duration) -> Result<()> {
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  loop {
    println!();
    println!("Join the Hoopin waitlist");

    let mut fields = FormFields::default();
    for kind in FieldKind::ALL {
      let Some(value) = prompt(&mut lines, label(kind)).await? else {
        return Ok(());
      };
      if let Some(err) = check_field(kind, &value) {
        print_field_error(&err);
      }
      fields.set(kind, value);
    }

    match form.submit(&fields).await {
      Ok(message) => {
        println!();
        println!("{message}");
        tokio::time::sleep(reset_delay).await;
      }
      Err(e) => render_failure(&e),
    }
  }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>> {
  print!("{label}: ");
  std::io::stdout().flush().ok();
  lines.next_line().await.context("reading stdin")
}

fn label(kind: FieldKind) -> &'static str {
  match kind {
    FieldKind::Name => "Full name",
    FieldKind::Email => "Email address",
    FieldKind::Society => "Society/apartment",
    FieldKind::City => "City",
    FieldKind::Workplace => "Workplace",
  }
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn render_failure(err: &SubmitError) {
  for line in err.messages() {
    eprintln!("  {line}");
  }
}

fn print_field_error(err: &FieldError) { eprintln!("  {err}"); }
