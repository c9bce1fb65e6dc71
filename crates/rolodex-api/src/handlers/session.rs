//! Login and logout.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/auth/login` | Body: `{"username","password"}`; returns a token |
//! | `DELETE` | `/auth/logout` | Clears the caller's token |

use axum::extract::State;
use rolodex_core::{store::Store, user::LoginUser, validate::Validate as _};
use serde::Serialize;

use crate::{
  AppState,
  auth::{CurrentUser, issue_session},
  envelope::{OK, WebResponse},
  error::ApiError,
  extract::Json,
  password,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
  pub token:      String,
  /// Epoch milliseconds.
  pub expired_at: i64,
}

/// `POST /auth/login`
///
/// An unknown username and a wrong password produce the same error after
/// the same argon2 work.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginUser>,
) -> Result<WebResponse<TokenResponse>, ApiError>
where
  S: Store + Clone + 'static,
{
  body.validate()?;

  let user = state
    .store
    .get_user(&body.username)
    .await
    .map_err(ApiError::store)?;
  let stored = user.as_ref().map(|u| u.password_hash.as_str());
  let verified = password::verify_or_dummy(&body.password, stored);
  let user = user.filter(|_| verified).ok_or(ApiError::BadCredentials)?;

  let session = issue_session(state.config.token_ttl_days);
  state
    .store
    .set_session(&user.username, Some(session.clone()))
    .await
    .map_err(ApiError::store)?;

  tracing::debug!(username = %user.username, "issued session token");
  Ok(WebResponse::data(TokenResponse {
    token:      session.token,
    expired_at: session.expired_at,
  }))
}

/// `DELETE /auth/logout`
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<WebResponse<&'static str>, ApiError>
where
  S: Store + Clone + 'static,
{
  state
    .store
    .set_session(&user.username, None)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(OK))
}
