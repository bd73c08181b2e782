//! Error types for `qcm-core`.

use thiserror::Error;

/// Every failure the core reports. None of these abort the process; each is
/// handed back to the transport layer as a result.
#[derive(Debug, Error)]
pub enum Error {
  /// The subject identifier does not have the `INFxxx` shape.
  #[error("invalid subject identifier {0:?}: expected INF followed by three digits")]
  InvalidFormat(String),

  /// A question payload is missing fields or has the wrong shape.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("subject {0} already exists")]
  Conflict(String),

  /// Deliberately carries no detail about which credential was wrong.
  #[error("invalid credentials")]
  Unauthorized,

  /// The credential backend failed to seal a new password.
  #[error("credential error: {0}")]
  Credential(String),

  /// Any fault raised by the underlying store, passed through unchanged.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error into [`Error::Store`].
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  /// Text of the underlying fault for server-side failures, if any.
  pub fn cause(&self) -> Option<String> {
    match self {
      Self::Store(e) => Some(e.to_string()),
      Self::Credential(m) => Some(m.clone()),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
