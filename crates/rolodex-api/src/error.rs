//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error is rendered inside the response envelope as
//! `{"errors": "<message>"}`.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rolodex_core::store::StoreError;
use thiserror::Error;

use crate::envelope::WebResponse;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  /// Missing, unknown and expired tokens all collapse into this one variant
  /// so callers cannot tell them apart.
  #[error("Unauthorized")]
  Unauthorized,

  /// Wrong username or wrong password at login; one message for both.
  #[error("Username or password wrong")]
  BadCredentials,

  #[error("{0}")]
  NotFound(String),

  #[error("Method not allowed")]
  MethodNotAllowed,

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a backend error onto an HTTP-level error via its domain meaning.
  pub fn store<E: StoreError>(e: E) -> Self {
    use rolodex_core::Error as D;
    match e.domain() {
      Some(d @ (D::ContactNotFound | D::AddressNotFound)) => Self::NotFound(d.to_string()),
      Some(d @ (D::UsernameTaken | D::Validation(_))) => Self::BadRequest(d.to_string()),
      // The session resolved moments ago points at a user that is gone.
      Some(D::UserNotFound) => Self::Unauthorized,
      None => Self::Internal(Box::new(e)),
    }
  }
}

impl From<rolodex_core::Error> for ApiError {
  fn from(e: rolodex_core::Error) -> Self { Self::store(e) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized | ApiError::BadCredentials => {
        (StatusCode::UNAUTHORIZED, self.to_string())
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
      }
    };
    (status, Json(WebResponse::<()>::error(message))).into_response()
  }
}
