//! The `QuizStore` trait.
//!
//! Implemented by storage backends (e.g. `qcm-store-sqlite`). The operations
//! in this crate and the HTTP layer depend on this abstraction only, so tests
//! can substitute an in-memory double.

use std::future::Future;

use uuid::Uuid;

use crate::{
  matiere::{Matiere, MatiereId, NewMatiere},
  question::{NewQuestion, Question},
  user::{NewUser, User},
};

/// Persistence for users, subjects and questions.
///
/// Every write touches a single record; nothing spans two collections. Lists
/// return records in insertion order with no filtering or paging. Deletes
/// report whether a record was removed, and removing nothing is not an
/// error.
pub trait QuizStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a user under a fresh store-generated identifier.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// All users whose email is byte-for-byte equal to `email`, in insertion
  /// order. Email is not unique.
  fn find_users_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + 'a;

  fn delete_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Insert a subject if its identifier is free.
  ///
  /// Returns `None` when the identifier is already taken; the existing
  /// record is never overwritten. Sets both timestamps to now.
  fn add_matiere(
    &self,
    input: NewMatiere,
  ) -> impl Future<Output = Result<Option<Matiere>, Self::Error>> + Send + '_;

  fn get_matiere<'a>(
    &'a self,
    id: &'a MatiereId,
  ) -> impl Future<Output = Result<Option<Matiere>, Self::Error>> + Send + 'a;

  fn list_matieres(
    &self,
  ) -> impl Future<Output = Result<Vec<Matiere>, Self::Error>> + Send + '_;

  fn delete_matiere<'a>(
    &'a self,
    id: &'a MatiereId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Questions ─────────────────────────────────────────────────────────

  /// Persist a question under a fresh store-generated identifier.
  fn add_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<Question, Self::Error>> + Send + '_;

  fn list_questions(
    &self,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + '_;

  /// Every question whose subject identifier equals `matiere_id` exactly.
  fn questions_for_matiere<'a>(
    &'a self,
    matiere_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + 'a;

  fn delete_question(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
