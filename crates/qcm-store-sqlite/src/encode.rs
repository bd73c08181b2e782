//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs are hyphenated lowercase strings,
//! and a question's propositions are a compact JSON array.

use chrono::{DateTime, Utc};
use qcm_core::{
  matiere::{Matiere, MatiereId},
  question::{PROPOSITION_COUNT, Question},
  user::{Role, User},
};
use rusqlite::Row;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_propositions(p: &[String; PROPOSITION_COUNT]) -> Result<String> {
  Ok(serde_json::to_string(p)?)
}

pub fn decode_propositions(s: &str) -> Result<[String; PROPOSITION_COUNT]> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "user_id, name, email, phone, password, role";

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:  String,
  pub name:     String,
  pub email:    String,
  pub phone:    String,
  pub password: String,
  pub role:     String,
}

impl RawUser {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:  row.get(0)?,
      name:     row.get(1)?,
      email:    row.get(2)?,
      phone:    row.get(3)?,
      password: row.get(4)?,
      role:     row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:  decode_uuid(&self.user_id)?,
      name:     self.name,
      email:    self.email,
      phone:    self.phone,
      password: self.password,
      role:     Role::from(self.role),
    })
  }
}

pub const MATIERE_COLUMNS: &str =
  "matiere_id, name, description, created_at, updated_at";

/// Raw strings read directly from a `matieres` row.
pub struct RawMatiere {
  pub matiere_id:  String,
  pub name:        String,
  pub description: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawMatiere {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      matiere_id:  row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      created_at:  row.get(3)?,
      updated_at:  row.get(4)?,
    })
  }

  pub fn into_matiere(self) -> Result<Matiere> {
    Ok(Matiere {
      id:          MatiereId::try_from(self.matiere_id)?,
      name:        self.name,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const QUESTION_COLUMNS: &str =
  "question_id, matiere_id, text, propositions, answer, explanation";

/// Raw strings read directly from a `questions` row.
pub struct RawQuestion {
  pub question_id:  String,
  pub matiere_id:   String,
  pub text:         String,
  pub propositions: String,
  pub answer:       String,
  pub explanation:  Option<String>,
}

impl RawQuestion {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      question_id:  row.get(0)?,
      matiere_id:   row.get(1)?,
      text:         row.get(2)?,
      propositions: row.get(3)?,
      answer:       row.get(4)?,
      explanation:  row.get(5)?,
    })
  }

  pub fn into_question(self) -> Result<Question> {
    Ok(Question {
      question_id:  decode_uuid(&self.question_id)?,
      matiere_id:   self.matiere_id,
      text:         self.text,
      propositions: decode_propositions(&self.propositions)?,
      answer:       self.answer,
      explanation:  self.explanation,
    })
  }
}
