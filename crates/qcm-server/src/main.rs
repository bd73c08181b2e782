//! qcm-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered with
//! `QCM_*` environment variables, opens the SQLite store, and serves the JSON
//! API over HTTP until interrupted. The store is closed after the listener
//! has drained.
//!
//! # Seeding an account by hand
//!
//! To produce the argon2 PHC string to put in the `password` column:
//!
//! ```
//! cargo run -p qcm-server -- --hash-password
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use qcm_core::auth::{Argon2Verifier, CredentialVerifier as _};
use qcm_server::{CredentialScheme, ServerConfig};
use qcm_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "QCM quiz backend server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_password {
    let password = read_password()?;
    let hash = Argon2Verifier
      .seal(&password)
      .context("failed to hash password")?;
    println!("{hash}");
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("QCM"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  if server_cfg.credential_scheme == CredentialScheme::Plaintext {
    tracing::warn!("passwords are stored and compared in clear text");
  }

  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  let app = qcm_server::app(Arc::clone(&store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("shutting down, closing store");
  SqliteStore::clone(&store)
    .close()
    .await
    .context("failed to close store")?;

  Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!("failed to listen for ctrl-c: {e}");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!("failed to listen for SIGTERM: {e}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
}

/// First line of stdin, without its line ending. The prompt goes to stderr
/// so stdout carries only the hash.
fn read_password() -> anyhow::Result<String> {
  eprint!("Password: ");
  let password = std::io::stdin()
    .lines()
    .next()
    .transpose()
    .context("failed to read stdin")?
    .unwrap_or_default();
  anyhow::ensure!(!password.is_empty(), "refusing to hash an empty password");
  Ok(password)
}
