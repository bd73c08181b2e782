//! Account registration and credential checks.
//!
//! How a password is stored and compared is delegated to a
//! [`CredentialVerifier`]. [`Argon2Verifier`] is the default;
//! [`PlaintextVerifier`] keeps passwords verbatim for databases populated by
//! older deployments.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{
  Error, Result,
  store::QuizStore,
  user::{NewUser, User, UserView},
};

// ─── Verifiers ───────────────────────────────────────────────────────────────

/// Turns passwords into their stored form and checks candidates against it.
pub trait CredentialVerifier: Send + Sync {
  /// Produce the value to persist for `password`.
  fn seal(&self, password: &str) -> Result<String>;

  /// `true` iff `candidate` matches the stored value. A malformed stored
  /// value is a mismatch, not an error.
  fn verify(&self, candidate: &str, stored: &str) -> bool;
}

/// Argon2id with a random per-password salt, stored as a PHC string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
  fn seal(&self, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map(|hash| hash.to_string())
      .map_err(|e| Error::Credential(format!("argon2 error: {e}")))
  }

  fn verify(&self, candidate: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
      return false;
    };
    Argon2::default()
      .verify_password(candidate.as_bytes(), &parsed)
      .is_ok()
  }
}

/// Stores passwords as given and compares them byte for byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
  fn seal(&self, password: &str) -> Result<String> { Ok(password.to_owned()) }

  fn verify(&self, candidate: &str, stored: &str) -> bool {
    candidate.as_bytes() == stored.as_bytes()
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Seal the password and persist a new user.
pub async fn register<S: QuizStore>(
  store: &S,
  verifier: &dyn CredentialVerifier,
  mut input: NewUser,
) -> Result<User> {
  input.password = verifier.seal(&input.password)?;
  store.add_user(input).await.map_err(Error::store)
}

/// Check an email/password pair.
///
/// Succeeds with the first user (in insertion order) carrying `email` whose
/// stored password verifies. An unknown email and a wrong password both
/// produce the same [`Error::Unauthorized`].
pub async fn login<S: QuizStore>(
  store: &S,
  verifier: &dyn CredentialVerifier,
  email: &str,
  password: &str,
) -> Result<UserView> {
  let candidates = store
    .find_users_by_email(email)
    .await
    .map_err(Error::store)?;

  candidates
    .iter()
    .find(|user| verifier.verify(password, &user.password))
    .map(UserView::from)
    .ok_or(Error::Unauthorized)
}
