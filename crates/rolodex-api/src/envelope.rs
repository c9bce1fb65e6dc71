//! The uniform response wrapper `{data?, errors?, paging?}`.

use axum::{
  Json,
  response::{IntoResponse, Response},
};
use rolodex_core::page::Page;
use serde::Serialize;

/// Exactly one of `data` and `errors` is set; `paging` accompanies `data`
/// on paginated listings only.
#[derive(Debug, Serialize)]
pub struct WebResponse<T> {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:   Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub paging: Option<Paging>,
}

/// Pagination metadata for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
  pub current_page: u32,
  pub total_page:   u64,
  pub size:         u32,
}

impl<T> WebResponse<T> {
  pub fn data(data: T) -> Self {
    Self { data: Some(data), errors: None, paging: None }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { data: None, errors: Some(message.into()), paging: None }
  }
}

impl<T> WebResponse<Vec<T>> {
  pub fn paged(page: Page<T>) -> Self {
    let paging = Paging {
      current_page: page.page,
      total_page:   page.total_pages(),
      size:         page.size,
    };
    Self { data: Some(page.items), errors: None, paging: Some(paging) }
  }
}

/// Payload for operations that return nothing but success.
pub const OK: &str = "OK";

impl<T: Serialize> IntoResponse for WebResponse<T> {
  fn into_response(self) -> Response { Json(self).into_response() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn data_only() {
    let v = serde_json::to_value(WebResponse::data(OK)).unwrap();
    assert_eq!(v, json!({ "data": "OK" }));
  }

  #[test]
  fn error_only() {
    let v = serde_json::to_value(WebResponse::<()>::error("nope")).unwrap();
    assert_eq!(v, json!({ "errors": "nope" }));
  }

  #[test]
  fn paged_carries_paging() {
    let page = Page { items: vec![1, 2], total: 12, page: 1, size: 2 };
    let v = serde_json::to_value(WebResponse::paged(page)).unwrap();
    assert_eq!(
      v,
      json!({
        "data": [1, 2],
        "paging": { "currentPage": 1, "totalPage": 6, "size": 2 }
      })
    );
  }
}
