//! Handler for `GET /api/quiz/{matiere_id}`.

use axum::{
  Json,
  extract::{Path, State},
};
use qcm_core::{quiz, store::QuizStore};
use serde_json::{Value, json};

use crate::{ApiState, error::ApiError};

/// `GET /api/quiz/{matiere_id}`: up to five random questions for the subject.
/// An unknown subject yields an empty list, not a 404.
pub async fn draw<S: QuizStore>(
  State(state): State<ApiState<S>>,
  Path(matiere_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let questions = quiz::draw(&*state.store, &matiere_id).await?;
  tracing::debug!(%matiere_id, drawn = questions.len(), "quiz drawn");
  Ok(Json(json!({ "success": true, "questions": questions })))
}
