//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as `{"success": false, "message": ...}`; server
//! faults additionally carry the underlying cause under `"error"`.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] qcm_core::Error),

  /// The request body could not be read as JSON of the expected shape.
  #[error("bad request: {0}")]
  BadRequest(String),
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use qcm_core::Error as E;

    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Core(e) => match e {
        E::InvalidFormat(_) | E::InvalidInput(_) => StatusCode::BAD_REQUEST,
        E::Unauthorized => StatusCode::UNAUTHORIZED,
        E::Conflict(_) => StatusCode::CONFLICT,
        E::Credential(_) | E::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
    };

    let cause = match &self {
      ApiError::Core(e) => e.cause(),
      ApiError::BadRequest(_) => None,
    };

    let body = match cause {
      Some(cause) => {
        tracing::error!(%cause, "request failed");
        json!({ "success": false, "message": "server error", "error": cause })
      }
      None => {
        tracing::warn!(%status, "{self}");
        json!({ "success": false, "message": self.to_string() })
      }
    };

    (status, Json(body)).into_response()
  }
}
