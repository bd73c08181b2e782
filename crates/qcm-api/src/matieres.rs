//! Handlers for `/api/matieres` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/matieres` | All subjects, insertion order |
//! | `POST`   | `/api/matieres` | Body: `{"id":"INF111","name":"...","description":"..."}`; 400 on a malformed id, 409 if taken |
//! | `DELETE` | `/api/matieres/{id}` | Succeeds whether or not the subject exists; its questions stay |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use qcm_core::{matiere, store::QuizStore};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/matieres`
pub async fn list<S: QuizStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Value>, ApiError> {
  let matieres = state
    .store
    .list_matieres()
    .await
    .map_err(qcm_core::Error::store)?;
  Ok(Json(json!({ "success": true, "matieres": matieres })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  /// Missing is the same as empty, and fails the format check.
  #[serde(default, alias = "_id")]
  pub id:          String,
  #[serde(default, alias = "nom")]
  pub name:        String,
  pub description: Option<String>,
}

/// `POST /api/matieres`
pub async fn create<S: QuizStore>(
  State(state): State<ApiState<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Json(body) = body?;
  let created =
    matiere::create(&*state.store, &body.id, body.name, body.description).await?;

  tracing::info!(matiere_id = %created.id, "matiere created");
  Ok(Json(json!({ "success": true, "matiere": created })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/matieres/{id}`
pub async fn delete_one<S: QuizStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  matiere::delete(&*state.store, &id).await?;
  tracing::info!(%id, "matiere deleted");
  Ok(Json(json!({ "success": true })))
}
