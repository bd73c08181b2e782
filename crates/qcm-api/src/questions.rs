//! Handlers for `/api/questions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/questions` | All questions, insertion order |
//! | `POST`   | `/api/questions` | Body: [`SubmitBody`]; 400 unless exactly four propositions and a non-empty answer |
//! | `DELETE` | `/api/questions/{id}` | Succeeds whether or not the question exists |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use qcm_core::{
  question::{self, QuestionDraft},
  store::QuizStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/questions`
pub async fn list<S: QuizStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Value>, ApiError> {
  let questions = state
    .store
    .list_questions()
    .await
    .map_err(qcm_core::Error::store)?;
  Ok(Json(json!({ "success": true, "questions": questions })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /api/questions`. Legacy field names are
/// accepted as aliases.
#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  pub matiere:      Option<String>,
  pub question:     Option<String>,
  #[serde(alias = "reponses")]
  pub propositions: Option<Vec<String>>,
  #[serde(alias = "bonneReponse")]
  pub answer:       Option<String>,
  #[serde(alias = "explication")]
  pub explanation:  Option<String>,
}

impl From<SubmitBody> for QuestionDraft {
  fn from(b: SubmitBody) -> Self {
    QuestionDraft {
      matiere_id:   b.matiere,
      text:         b.question,
      propositions: b.propositions,
      answer:       b.answer,
      explanation:  b.explanation,
    }
  }
}

/// `POST /api/questions`
///
/// A body that does not even parse (wrong JSON types, say) is reported as
/// invalid input, same as a missing field.
pub async fn create<S: QuizStore>(
  State(state): State<ApiState<S>>,
  body: Result<Json<SubmitBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Json(body) =
    body.map_err(|e| qcm_core::Error::InvalidInput(e.body_text()))?;
  let stored = question::submit(&*state.store, body.into()).await?;

  tracing::info!(
    question_id = %stored.question_id,
    matiere_id = %stored.matiere_id,
    "question created"
  );
  Ok(Json(json!({ "success": true, "question": stored })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/questions/{id}`
pub async fn delete_one<S: QuizStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  question::delete(&*state.store, &id).await?;
  tracing::info!(%id, "question deleted");
  Ok(Json(json!({ "success": true })))
}
