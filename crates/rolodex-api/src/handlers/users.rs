//! Handlers for `/users` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/users` | Registration; no auth |
//! | `GET`   | `/users/current` | The authenticated user |
//! | `PATCH` | `/users/current` | Body: `{"name"?, "password"?}` |

use axum::extract::State;
use rolodex_core::{
  store::Store,
  user::{RegisterUser, UpdateUser, User, UserChanges},
  validate::Validate as _,
};
use serde::Serialize;

use crate::{
  AppState,
  auth::CurrentUser,
  envelope::{OK, WebResponse},
  error::ApiError,
  extract::Json,
  password,
};

#[derive(Debug, Serialize)]
pub struct UserResponse {
  pub username: String,
  pub name:     String,
}

impl From<User> for UserResponse {
  fn from(u: User) -> Self {
    Self { username: u.username, name: u.name }
  }
}

/// `POST /users`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterUser>,
) -> Result<WebResponse<&'static str>, ApiError>
where
  S: Store + Clone + 'static,
{
  body.validate()?;

  let hash = password::hash(&body.password)?;
  let user = state
    .store
    .create_user(User::new(body.username, hash, body.name))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(username = %user.username, "registered user");
  Ok(WebResponse::data(OK))
}

/// `GET /users/current`
pub async fn current(CurrentUser(user): CurrentUser) -> WebResponse<UserResponse> {
  WebResponse::data(user.into())
}

/// `PATCH /users/current`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(body): Json<UpdateUser>,
) -> Result<WebResponse<UserResponse>, ApiError>
where
  S: Store + Clone + 'static,
{
  body.validate()?;

  let changes = UserChanges {
    name:          body.name,
    password_hash: body.password.as_deref().map(password::hash).transpose()?,
  };
  let updated = state
    .store
    .update_user(&user.username, changes)
    .await
    .map_err(ApiError::store)?;

  Ok(WebResponse::data(updated.into()))
}
