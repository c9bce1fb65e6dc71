//! Token authentication: the `X-API-TOKEN` extractor and session issuing.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use rand_core::{OsRng, RngCore as _};
use rolodex_core::{
  store::Store,
  user::{Session, User},
};

use crate::{AppState, error::ApiError};

/// Request header carrying the session token.
pub const TOKEN_HEADER: &str = "x-api-token";

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 { Utc::now().timestamp_millis() }

/// A fresh session: 128 random bits from the OS, hex-encoded, valid for
/// `ttl_days` from now.
pub fn issue_session(ttl_days: u32) -> Session {
  let mut bytes = [0u8; 16];
  OsRng.fill_bytes(&mut bytes);
  Session {
    token:      hex::encode(bytes),
    expired_at: now_millis() + Duration::days(i64::from(ttl_days)).num_milliseconds(),
  }
}

/// The user behind a valid `X-API-TOKEN`. Present in a handler's arguments
/// means the request was authenticated.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: Store + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = parts
      .headers
      .get(TOKEN_HEADER)
      .and_then(|v| v.to_str().ok())
      .filter(|t| !t.is_empty())
      .ok_or(ApiError::Unauthorized)?;

    let user = state
      .store
      .find_user_by_token(token)
      .await
      .map_err(ApiError::store)?
      .filter(|u| u.session_live_at(now_millis()))
      .ok_or(ApiError::Unauthorized)?;

    Ok(CurrentUser(user))
  }
}
