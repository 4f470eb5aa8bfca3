//! hoopin-endpoint server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus
//! `HOOPIN_*` environment variables, opens the SQLite waitlist table, and
//! serves the intake endpoint over HTTP.
//!
//! # Operator helpers
//!
//! ```
//! cargo run -p hoopin-endpoint --bin server -- --dump
//! cargo run -p hoopin-endpoint --bin server -- --reset-store
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use hoopin_core::row::WaitlistRow;
use hoopin_endpoint::{AppState, ServerConfig};
use hoopin_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Hoopin waitlist intake endpoint")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Delete every row from the waitlist table and exit.
  #[arg(long, conflicts_with = "dump")]
  reset_store: bool,

  /// Print the header and every row as tab-separated lines and exit.
  #[arg(long)]
  dump: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "waitlist.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("HOOPIN"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(dir) = store_path.parent().filter(|d| !d.as_os_str().is_empty()) {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {dir:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if cli.reset_store {
    store.reset().await.context("failed to reset store")?;
    tracing::info!("Cleared waitlist table at {store_path:?}");
    return Ok(());
  }

  if cli.dump {
    println!("{}", WaitlistRow::HEADER.join("\t"));
    for row in store.rows().await.context("failed to read rows")? {
      println!("{}", row.to_columns().join("\t"));
    }
    return Ok(());
  }

  let state = AppState {
    store:  Arc::new(store),
    config: Arc::new(server_cfg.clone()),
  };

  let app = hoopin_endpoint::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(
    body_format = ?server_cfg.body_format,
    body_limit = ?server_cfg.body_limit,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to install Ctrl+C handler: {e}");
    std::future::pending::<()>().await;
  }
  tracing::info!("Received Ctrl+C, shutting down");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
