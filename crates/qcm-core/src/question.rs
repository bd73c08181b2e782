//! Multiple-choice questions.
//!
//! A question names its subject by identifier only; nothing checks that the
//! subject exists, so questions may reference subjects created later or
//! already deleted. Likewise the declared answer is not required to be one of
//! the propositions.

use serde::Serialize;
use uuid::Uuid;

use crate::{Error, Result, store::QuizStore};

/// Every question carries exactly this many propositions.
pub const PROPOSITION_COUNT: usize = 4;

/// A persisted question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
  pub question_id:  Uuid,
  /// Identifier of the owning subject, copied verbatim from the submission.
  pub matiere_id:   String,
  pub text:         String,
  /// Display order only; kept exactly as submitted.
  pub propositions: [String; PROPOSITION_COUNT],
  pub answer:       String,
  pub explanation:  Option<String>,
}

/// A validated submission, ready for [`QuizStore::add_question`].
#[derive(Debug, Clone)]
pub struct NewQuestion {
  pub matiere_id:   String,
  pub text:         String,
  pub propositions: [String; PROPOSITION_COUNT],
  pub answer:       String,
  pub explanation:  Option<String>,
}

/// A question submission as received, before any checks.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
  pub matiere_id:   Option<String>,
  pub text:         Option<String>,
  pub propositions: Option<Vec<String>>,
  pub answer:       Option<String>,
  pub explanation:  Option<String>,
}

impl QuestionDraft {
  /// Check the submission shape. Any violation yields
  /// [`Error::InvalidInput`].
  pub fn validate(self) -> Result<NewQuestion> {
    let matiere_id = required(self.matiere_id, "subject identifier")?;
    let text = required(self.text, "question text")?;

    let propositions = self
      .propositions
      .ok_or_else(|| invalid("propositions are missing"))?;
    let count = propositions.len();
    let propositions: [String; PROPOSITION_COUNT] =
      propositions.try_into().map_err(|_| {
        invalid(format!(
          "expected {PROPOSITION_COUNT} propositions, got {count}"
        ))
      })?;

    let answer = required(self.answer, "correct answer")?;

    Ok(NewQuestion {
      matiere_id,
      text,
      propositions,
      answer,
      explanation: self.explanation,
    })
  }
}

fn invalid(message: impl Into<String>) -> Error {
  Error::InvalidInput(message.into())
}

fn required(value: Option<String>, field: &str) -> Result<String> {
  match value {
    Some(v) if !v.is_empty() => Ok(v),
    _ => Err(invalid(format!("{field} is missing or empty"))),
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Validate and persist a question. Nothing is written if validation fails.
pub async fn submit<S: QuizStore>(
  store: &S,
  draft: QuestionDraft,
) -> Result<Question> {
  let input = draft.validate()?;
  store.add_question(input).await.map_err(Error::store)
}

/// Delete a question by identifier. Unknown or malformed identifiers succeed.
pub async fn delete<S: QuizStore>(store: &S, id: &str) -> Result<()> {
  let Ok(id) = Uuid::parse_str(id) else {
    return Ok(());
  };
  store.delete_question(id).await.map_err(Error::store)?;
  Ok(())
}
