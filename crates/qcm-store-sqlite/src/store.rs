//! [`SqliteStore`], the SQLite implementation of [`QuizStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use qcm_core::{
  matiere::{Matiere, MatiereId, NewMatiere},
  question::{NewQuestion, Question},
  store::QuizStore,
  user::{NewUser, User},
};

use crate::{
  Result,
  encode::{
    MATIERE_COLUMNS, QUESTION_COLUMNS, RawMatiere, RawQuestion, RawUser,
    USER_COLUMNS, encode_dt, encode_propositions, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A quiz store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Calls made through other clones
  /// afterwards fail with a connection-closed error.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `DELETE ... WHERE <key> = ?1` and report whether a row went.
  async fn delete_by_key(&self, sql: &'static str, key: String) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![key])?))
      .await?;
    tracing::debug!(removed, "{sql}");
    Ok(removed > 0)
  }
}

// ─── QuizStore impl ──────────────────────────────────────────────────────────

impl QuizStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      user_id:  Uuid::new_v4(),
      name:     input.name,
      email:    input.email,
      phone:    input.phone,
      password: input.password,
      role:     input.role,
    };

    let id_str   = encode_uuid(user.user_id);
    let name     = user.name.clone();
    let email    = user.email.clone();
    let phone    = user.phone.clone();
    let password = user.password.clone();
    let role     = user.role.as_str().to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, name, email, phone, password, role)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, email, phone, password, role],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(user_id = %user.user_id, "inserted user");
    Ok(user)
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn find_users_by_email(&self, email: &str) -> Result<Vec<User>> {
    let email = email.to_owned();

    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_COLUMNS} FROM users WHERE email = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![email], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn delete_user(&self, id: Uuid) -> Result<bool> {
    self
      .delete_by_key("DELETE FROM users WHERE user_id = ?1", encode_uuid(id))
      .await
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn add_matiere(&self, input: NewMatiere) -> Result<Option<Matiere>> {
    let now = Utc::now();
    let matiere = Matiere {
      id:          input.id,
      name:        input.name,
      description: input.description,
      created_at:  now,
      updated_at:  now,
    };

    let id_str      = matiere.id.as_str().to_owned();
    let name        = matiere.name.clone();
    let description = matiere.description.clone();
    let at_str      = encode_dt(now);

    // The primary key decides between racing creators; the loser inserts
    // nothing and the stored row keeps its name and description.
    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO matieres (matiere_id, name, description, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)
           ON CONFLICT (matiere_id) DO NOTHING",
          rusqlite::params![id_str, name, description, at_str],
        )?)
      })
      .await?;

    if inserted == 0 {
      tracing::debug!(matiere_id = %matiere.id, "matiere already present");
      return Ok(None);
    }

    tracing::debug!(matiere_id = %matiere.id, "inserted matiere");
    Ok(Some(matiere))
  }

  async fn get_matiere(&self, id: &MatiereId) -> Result<Option<Matiere>> {
    let id_str = id.as_str().to_owned();

    let raw: Option<RawMatiere> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {MATIERE_COLUMNS} FROM matieres WHERE matiere_id = ?1"),
              rusqlite::params![id_str],
              RawMatiere::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMatiere::into_matiere).transpose()
  }

  async fn list_matieres(&self) -> Result<Vec<Matiere>> {
    let raws: Vec<RawMatiere> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MATIERE_COLUMNS} FROM matieres ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawMatiere::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMatiere::into_matiere).collect()
  }

  async fn delete_matiere(&self, id: &MatiereId) -> Result<bool> {
    self
      .delete_by_key(
        "DELETE FROM matieres WHERE matiere_id = ?1",
        id.as_str().to_owned(),
      )
      .await
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn add_question(&self, input: NewQuestion) -> Result<Question> {
    let question = Question {
      question_id:  Uuid::new_v4(),
      matiere_id:   input.matiere_id,
      text:         input.text,
      propositions: input.propositions,
      answer:       input.answer,
      explanation:  input.explanation,
    };

    let id_str           = encode_uuid(question.question_id);
    let matiere_id       = question.matiere_id.clone();
    let text             = question.text.clone();
    let propositions_str = encode_propositions(&question.propositions)?;
    let answer           = question.answer.clone();
    let explanation      = question.explanation.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO questions (
             question_id, matiere_id, text, propositions, answer, explanation
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            matiere_id,
            text,
            propositions_str,
            answer,
            explanation,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(question_id = %question.question_id, "inserted question");
    Ok(question)
  }

  async fn list_questions(&self) -> Result<Vec<Question>> {
    let raws: Vec<RawQuestion> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawQuestion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuestion::into_question).collect()
  }

  async fn questions_for_matiere(&self, matiere_id: &str) -> Result<Vec<Question>> {
    let matiere_id = matiere_id.to_owned();

    let raws: Vec<RawQuestion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {QUESTION_COLUMNS} FROM questions
           WHERE matiere_id = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![matiere_id], RawQuestion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuestion::into_question).collect()
  }

  async fn delete_question(&self, id: Uuid) -> Result<bool> {
    self
      .delete_by_key(
        "DELETE FROM questions WHERE question_id = ?1",
        encode_uuid(id),
      )
      .await
  }
}
