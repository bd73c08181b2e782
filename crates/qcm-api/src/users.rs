//! Handlers for `/api/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/users` | All users, insertion order |
//! | `POST`   | `/api/users` | Body: [`CreateBody`]; password is sealed before storage |
//! | `DELETE` | `/api/users/{id}` | Succeeds whether or not the user exists |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use qcm_core::{
  auth,
  store::QuizStore,
  user::{self, NewUser, Role},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{ApiState, as_text, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/users`
pub async fn list<S: QuizStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Value>, ApiError> {
  let users = state
    .store
    .list_users()
    .await
    .map_err(qcm_core::Error::store)?;
  Ok(Json(json!({ "success": true, "users": users })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /api/users`. Legacy field names are accepted
/// as aliases. Fields are taken as raw JSON and read as text, so a numeric
/// phone number or a `null` role never rejects the registration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateBody {
  #[serde(alias = "nom")]
  pub name:     Value,
  pub email:    Value,
  #[serde(alias = "numero")]
  pub phone:    Value,
  pub password: Value,
  #[serde(alias = "type")]
  pub role:     Value,
}

impl From<CreateBody> for NewUser {
  fn from(b: CreateBody) -> Self {
    let role = match b.role {
      Value::Null => Role::default(),
      other => Role::from(as_text(other)),
    };
    NewUser {
      name:     as_text(b.name),
      email:    as_text(b.email),
      phone:    as_text(b.phone),
      password: as_text(b.password),
      role,
    }
  }
}

/// `POST /api/users`
pub async fn create<S: QuizStore>(
  State(state): State<ApiState<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Json(body) = body?;
  let user =
    auth::register(&*state.store, &*state.verifier, NewUser::from(body)).await?;

  tracing::info!(user_id = %user.user_id, role = user.role.as_str(), "user created");
  Ok(Json(json!({ "success": true, "user": user })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/users/{id}`
pub async fn delete_one<S: QuizStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  user::delete(&*state.store, &id).await?;
  tracing::info!(%id, "user deleted");
  Ok(Json(json!({ "success": true })))
}
