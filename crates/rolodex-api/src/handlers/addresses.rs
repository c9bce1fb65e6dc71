//! Handlers for `/contacts/{contact_id}/addresses` endpoints.
//!
//! Every handler resolves the contact through the caller first; a missing or
//! foreign contact is "Contact not found" before the address is considered.

use axum::extract::State;
use rolodex_core::{
  address::{Address, AddressPatch, NewAddress},
  store::Store,
  validate::Validate as _,
};
use serde::Serialize;

use crate::{
  AppState,
  auth::CurrentUser,
  envelope::{OK, WebResponse},
  error::ApiError,
  extract::{Json, Path},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
  pub id:          i64,
  pub street:      Option<String>,
  pub city:        Option<String>,
  pub province:    Option<String>,
  pub country:     String,
  pub postal_code: Option<String>,
}

impl From<Address> for AddressResponse {
  fn from(a: Address) -> Self {
    Self {
      id:          a.id,
      street:      a.street,
      city:        a.city,
      province:    a.province,
      country:     a.country,
      postal_code: a.postal_code,
    }
  }
}

/// `POST /contacts/{contact_id}/addresses`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(contact_id): Path<i64>,
  Json(body): Json<NewAddress>,
) -> Result<WebResponse<AddressResponse>, ApiError>
where
  S: Store + Clone + 'static,
{
  body.validate()?;
  let address = state
    .store
    .create_address(&user.username, contact_id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(address.into()))
}

/// `GET /contacts/{contact_id}/addresses`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(contact_id): Path<i64>,
) -> Result<WebResponse<Vec<AddressResponse>>, ApiError>
where
  S: Store + Clone + 'static,
{
  let addresses = state
    .store
    .list_addresses(&user.username, contact_id)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(addresses.into_iter().map(Into::into).collect()))
}

/// `GET /contacts/{contact_id}/addresses/{address_id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path((contact_id, address_id)): Path<(i64, i64)>,
) -> Result<WebResponse<AddressResponse>, ApiError>
where
  S: Store + Clone + 'static,
{
  let address = state
    .store
    .get_address(&user.username, contact_id, address_id)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(address.into()))
}

/// `PUT /contacts/{contact_id}/addresses/{address_id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path((contact_id, address_id)): Path<(i64, i64)>,
  Json(body): Json<AddressPatch>,
) -> Result<WebResponse<AddressResponse>, ApiError>
where
  S: Store + Clone + 'static,
{
  body.validate()?;
  let address = state
    .store
    .update_address(&user.username, contact_id, address_id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(address.into()))
}

/// `DELETE /contacts/{contact_id}/addresses/{address_id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path((contact_id, address_id)): Path<(i64, i64)>,
) -> Result<WebResponse<&'static str>, ApiError>
where
  S: Store + Clone + 'static,
{
  state
    .store
    .delete_address(&user.username, contact_id, address_id)
    .await
    .map_err(ApiError::store)?;
  Ok(WebResponse::data(OK))
}
