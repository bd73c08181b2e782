//! Subjects ("matières") and the rules around their identifiers.
//!
//! A subject is keyed by a caller-supplied code of the form `INF` followed by
//! exactly three decimal digits. The code is validated before anything touches
//! the store, and is unique and immutable once written.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, store::QuizStore};

/// Literal prefix every subject identifier starts with.
pub const ID_PREFIX: &str = "INF";
/// Number of decimal digits following [`ID_PREFIX`].
pub const ID_DIGITS: usize = 3;

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Returns `true` iff `raw` is exactly `INF` + three ASCII digits.
pub fn is_well_formed(raw: &str) -> bool {
  raw.strip_prefix(ID_PREFIX).is_some_and(|digits| {
    digits.len() == ID_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
  })
}

/// A subject identifier that has passed [`is_well_formed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatiereId(String);

impl MatiereId {
  /// Validate `raw`, failing with [`Error::InvalidFormat`].
  pub fn parse(raw: &str) -> Result<Self> {
    if is_well_formed(raw) {
      Ok(Self(raw.to_owned()))
    } else {
      Err(Error::InvalidFormat(raw.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for MatiereId {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self> {
    if is_well_formed(&raw) {
      Ok(Self(raw))
    } else {
      Err(Error::InvalidFormat(raw))
    }
  }
}

impl From<MatiereId> for String {
  fn from(id: MatiereId) -> Self { id.0 }
}

impl fmt::Display for MatiereId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted subject. Timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct Matiere {
  pub id:          MatiereId,
  pub name:        String,
  pub description: Option<String>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input to [`QuizStore::add_matiere`].
#[derive(Debug, Clone)]
pub struct NewMatiere {
  pub id:          MatiereId,
  pub name:        String,
  pub description: Option<String>,
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Create a subject: validate the identifier, check it is free, then persist.
///
/// The lookup is only a fast path. Two callers racing on the same identifier
/// both pass it, and the store's insert-if-absent decides the winner; the
/// loser gets [`Error::Conflict`] and the stored record is left untouched.
pub async fn create<S: QuizStore>(
  store: &S,
  id: &str,
  name: String,
  description: Option<String>,
) -> Result<Matiere> {
  let id = MatiereId::parse(id)?;

  if store.get_matiere(&id).await.map_err(Error::store)?.is_some() {
    return Err(Error::Conflict(id.to_string()));
  }

  let input = NewMatiere { id: id.clone(), name, description };
  store
    .add_matiere(input)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::Conflict(id.to_string()))
}

/// Delete a subject by identifier. Absence is not an error, and neither is a
/// malformed identifier, since no stored subject can carry one.
///
/// Questions referencing the subject are left in place.
pub async fn delete<S: QuizStore>(store: &S, id: &str) -> Result<()> {
  let Ok(id) = MatiereId::parse(id) else {
    return Ok(());
  };
  store.delete_matiere(&id).await.map_err(Error::store)?;
  Ok(())
}
