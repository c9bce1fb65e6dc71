//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/contacts` | Body: [`NewContact`] |
//! | `GET`    | `/contacts` | `?name&email&phone&page&size`; paginated |
//! | `GET`    | `/contacts/{id}` | 404 if absent or not the caller's |
//! | `PUT`    | `/contacts/{id}` | Body: [`ContactPatch`]; merge-patch |
//! | `DELETE` | `/contacts/{id}` | Also removes the contact's addresses |

use axum::extract::State;
use rolodex_core::{
  contact::{Contact, ContactFilter, ContactPatch, NewContact},
  store::Store,
  validate::Validate as _,
};
use serde::Serialize;

use crate::{
  AppState,
  auth::CurrentUser,
  envelope::{OK, WebResponse},
  error::ApiError,
  extract::{Json, Path, Query},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
}

impl From<Contact> for ContactResponse {
  fn from(c: Contact) -> Self {
    Self {
      id:         c.id,
      first_name: c.first_name,
      last_name:  c.last_name,
      email:      c.email,
      phone:      c.phone,
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(body): Json<NewContact>,
) -> Result<WebResponse<ContactResponse>, ApiError>
where
  S: Store + Clone + 'static,
{
  body.validate()?;
  let contact = state
    .store
    .create_contact(&user.username, body)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(contact.into()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<WebResponse<ContactResponse>, ApiError>
where
  S: Store + Clone + 'static,
{
  let contact = state
    .store
    .get_contact(&user.username, id)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(contact.into()))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<ContactPatch>,
) -> Result<WebResponse<ContactResponse>, ApiError>
where
  S: Store + Clone + 'static,
{
  body.validate()?;
  let contact = state
    .store
    .update_contact(&user.username, id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(contact.into()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<WebResponse<&'static str>, ApiError>
where
  S: Store + Clone + 'static,
{
  state
    .store
    .delete_contact(&user.username, id)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(OK))
}

// ─── Search ───────────────────────────────────────────────────────────────────

/// `GET /contacts[?name=...][&email=...][&phone=...][&page=...][&size=...]`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Query(filter): Query<ContactFilter>,
) -> Result<WebResponse<Vec<ContactResponse>>, ApiError>
where
  S: Store + Clone + 'static,
{
  filter.validate()?;
  let page = state
    .store
    .search_contacts(&user.username, &filter)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::paged(page.map(ContactResponse::from)))
}
