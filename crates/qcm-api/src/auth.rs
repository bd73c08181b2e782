//! Handler for `POST /auth/login`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use qcm_core::{auth, store::QuizStore};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{ApiState, as_text, error::ApiError};

/// Missing or `null` fields are read as empty strings, which match no
/// account unless one was registered with empty credentials.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginBody {
  pub email:    Value,
  pub password: Value,
}

/// `POST /auth/login`, body `{"email":"...","password":"..."}`
pub async fn login<S: QuizStore>(
  State(state): State<ApiState<S>>,
  body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Json(body) = body?;
  let email = as_text(body.email);
  let password = as_text(body.password);
  let user =
    auth::login(&*state.store, &*state.verifier, &email, &password).await?;

  tracing::info!(email = %user.email, "login succeeded");
  Ok(Json(json!({ "success": true, "user": user })))
}
