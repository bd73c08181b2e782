//! Process shell for the QCM quiz backend.
//!
//! Holds the runtime configuration and assembles the HTTP application around
//! [`qcm_api::api_router`]. The binary in `main.rs` owns the store lifecycle.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use qcm_core::{
  auth::{Argon2Verifier, CredentialVerifier, PlaintextVerifier},
  store::QuizStore,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// How passwords are stored and compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialScheme {
  #[default]
  Argon2,
  /// Verbatim storage and comparison, for databases written that way.
  Plaintext,
}

impl CredentialScheme {
  pub fn verifier(self) -> Arc<dyn CredentialVerifier> {
    match self {
      Self::Argon2 => Arc::new(Argon2Verifier),
      Self::Plaintext => Arc::new(PlaintextVerifier),
    }
  }
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `QCM_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        PathBuf,
  pub credential_scheme: CredentialScheme,
  /// Allow any origin, method and header.
  pub cors_permissive:   bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "127.0.0.1".to_string(),
      port:              3000,
      store_path:        PathBuf::from("quiz-app.sqlite3"),
      credential_scheme: CredentialScheme::default(),
      cors_permissive:   true,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` component resolved against `$HOME`.
  /// `~user` forms are left alone.
  pub fn resolved_store_path(&self) -> PathBuf {
    match (self.store_path.strip_prefix("~"), std::env::var_os("HOME")) {
      (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
      _ => self.store_path.clone(),
    }
  }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Build the HTTP application: API routes plus tracing and CORS layers.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: QuizStore + 'static,
{
  let router = qcm_api::api_router(store, config.credential_scheme.verifier())
    .layer(TraceLayer::new_for_http());

  if config.cors_permissive {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}
