//! JSON REST API for the QCM quiz backend.
//!
//! Exposes an axum [`Router`] backed by any [`qcm_core::store::QuizStore`].
//! TLS, CORS and request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = qcm_api::api_router(Arc::new(store), Arc::new(Argon2Verifier));
//! ```

pub mod auth;
pub mod error;
pub mod matieres;
pub mod questions;
pub mod quiz;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use qcm_core::{auth::CredentialVerifier, store::QuizStore};
use serde_json::Value;

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  pub verifier: Arc<dyn CredentialVerifier>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      verifier: Arc::clone(&self.verifier),
    }
  }
}

/// Build the full API router for `store`, sealing and checking passwords
/// with `verifier`.
pub fn api_router<S>(
  store: Arc<S>,
  verifier: Arc<dyn CredentialVerifier>,
) -> Router<()>
where
  S: QuizStore + 'static,
{
  Router::new()
    .route("/auth/login", post(auth::login::<S>))
    // Users
    .route("/api/users", get(users::list::<S>).post(users::create::<S>))
    .route("/api/users/{id}", delete(users::delete_one::<S>))
    // Subjects
    .route(
      "/api/matieres",
      get(matieres::list::<S>).post(matieres::create::<S>),
    )
    .route("/api/matieres/{id}", delete(matieres::delete_one::<S>))
    // Questions
    .route(
      "/api/questions",
      get(questions::list::<S>).post(questions::create::<S>),
    )
    .route("/api/questions/{id}", delete(questions::delete_one::<S>))
    // Quiz draws
    .route("/api/quiz/{matiere_id}", get(quiz::draw::<S>))
    .with_state(ApiState { store, verifier })
}

/// Read a loosely typed JSON field as text: strings as-is, `null` as empty,
/// anything else as its JSON rendering (`612345678`, `true`).
pub(crate) fn as_text(value: Value) -> String {
  match value {
    Value::String(s) => s,
    Value::Null => String::new(),
    other => other.to_string(),
  }
}

#[cfg(test)]
mod tests;
