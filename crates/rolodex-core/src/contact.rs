//! Contacts: the people a user keeps track of.
//!
//! Every contact belongs to exactly one user. Stores resolve contacts by the
//! `(owner, id)` pair; an id owned by someone else simply does not exist from
//! the caller's point of view.

use serde::Deserialize;

use crate::patch::{merge_optional, merge_required, non_empty};

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
  pub id:         i64,
  /// Username of the owning user.
  pub owner:      String,
  pub first_name: String,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
}

impl Contact {
  /// Merge `patch` into this contact, leaving absent fields untouched.
  pub fn apply(&mut self, patch: ContactPatch) {
    merge_required(&mut self.first_name, patch.first_name);
    merge_optional(&mut self.last_name, patch.last_name);
    merge_optional(&mut self.email, patch.email);
    merge_optional(&mut self.phone, patch.phone);
  }
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Body of `POST /api/contacts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
  #[serde(default)]
  pub first_name: String,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
}

impl NewContact {
  /// Build the contact that a store will persist; the id is filled in by the
  /// store on insert. Empty optional fields are stored as absent.
  pub fn into_contact(self, owner: &str) -> Contact {
    Contact {
      id:         0,
      owner:      owner.to_owned(),
      first_name: self.first_name,
      last_name:  non_empty(self.last_name),
      email:      non_empty(self.email),
      phone:      non_empty(self.phone),
    }
  }
}

// ─── ContactPatch ────────────────────────────────────────────────────────────

/// Body of `PUT /api/contacts/{id}`: every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
}

// ─── ContactFilter ───────────────────────────────────────────────────────────

fn default_page_size() -> u32 { 10 }

/// Query parameters of `GET /api/contacts`.
///
/// Text filters are case-sensitive substring matches. An empty filter string
/// is the same as no filter.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactFilter {
  /// Matches either the first or the last name.
  pub name:  Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  /// Zero-based page index.
  #[serde(default)]
  pub page:  u32,
  #[serde(default = "default_page_size")]
  pub size:  u32,
}

impl Default for ContactFilter {
  fn default() -> Self {
    Self { name: None, email: None, phone: None, page: 0, size: default_page_size() }
  }
}

impl ContactFilter {
  pub fn name(&self) -> Option<&str> { self.name.as_deref().filter(|s| !s.is_empty()) }

  pub fn email(&self) -> Option<&str> { self.email.as_deref().filter(|s| !s.is_empty()) }

  pub fn phone(&self) -> Option<&str> { self.phone.as_deref().filter(|s| !s.is_empty()) }
}
