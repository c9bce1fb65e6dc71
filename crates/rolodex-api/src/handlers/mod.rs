pub mod addresses;
pub mod contacts;
pub mod session;
pub mod users;

use crate::error::ApiError;

/// Fallback for unrouted paths; still answers inside the envelope.
pub(crate) async fn not_found() -> ApiError {
  ApiError::NotFound("Not found".to_string())
}

/// A known path requested with a method it does not serve.
pub(crate) async fn method_not_allowed() -> ApiError { ApiError::MethodNotAllowed }
