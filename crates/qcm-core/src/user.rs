//! User accounts.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, store::QuizStore};

/// The role flag stored on a user. Stored as free text; unrecognised values
/// are kept as-is rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
  #[default]
  Student,
  Admin,
  Other(String),
}

impl Role {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Student => "student",
      Self::Admin => "admin",
      Self::Other(s) => s,
    }
  }
}

impl From<String> for Role {
  fn from(s: String) -> Self {
    match s.as_str() {
      "student" => Self::Student,
      "admin" => Self::Admin,
      _ => Self::Other(s),
    }
  }
}

impl From<Role> for String {
  fn from(role: Role) -> Self {
    match role {
      Role::Other(s) => s,
      known => known.as_str().to_owned(),
    }
  }
}

/// A persisted user. The stored password is never serialised.
#[derive(Clone, Serialize)]
pub struct User {
  pub user_id:  Uuid,
  pub name:     String,
  pub email:    String,
  pub phone:    String,
  /// Stored form produced by the configured
  /// [`CredentialVerifier`](crate::auth::CredentialVerifier).
  #[serde(skip_serializing)]
  pub password: String,
  pub role:     Role,
}

impl fmt::Debug for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("User")
      .field("user_id", &self.user_id)
      .field("name", &self.name)
      .field("email", &self.email)
      .field("phone", &self.phone)
      .field("password", &"<redacted>")
      .field("role", &self.role)
      .finish()
  }
}

/// Input to [`QuizStore::add_user`]. `password` must already be sealed.
#[derive(Clone)]
pub struct NewUser {
  pub name:     String,
  pub email:    String,
  pub phone:    String,
  pub password: String,
  pub role:     Role,
}

/// What a successful login reveals about the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
  pub name:  String,
  pub email: String,
  pub phone: String,
  pub role:  Role,
}

impl From<&User> for UserView {
  fn from(u: &User) -> Self {
    Self {
      name:  u.name.clone(),
      email: u.email.clone(),
      phone: u.phone.clone(),
      role:  u.role.clone(),
    }
  }
}

/// Delete a user by identifier. Unknown or malformed identifiers succeed.
pub async fn delete<S: QuizStore>(store: &S, id: &str) -> Result<()> {
  let Ok(id) = Uuid::parse_str(id) else {
    return Ok(());
  };
  store.delete_user(id).await.map_err(Error::store)?;
  Ok(())
}
