//! Column lists and row decoders between SQLite rows and domain types.
//!
//! Each `*_COLUMNS` constant lists columns in the order its decoder reads
//! them; keep the two in sync.

use rolodex_core::{
  address::Address,
  contact::Contact,
  user::{Session, User},
};
use rusqlite::Row;

// ─── Users ───────────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "username, password_hash, name, token, token_expired_at";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub username:         String,
  pub password_hash:    String,
  pub name:             String,
  pub token:            Option<String>,
  pub token_expired_at: Option<i64>,
}

impl RawUser {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      username:         row.get(0)?,
      password_hash:    row.get(1)?,
      name:             row.get(2)?,
      token:            row.get(3)?,
      token_expired_at: row.get(4)?,
    })
  }

  /// A half-written session (token without expiry or the reverse) is treated
  /// as no session at all.
  pub fn into_user(self) -> User {
    let session = match (self.token, self.token_expired_at) {
      (Some(token), Some(expired_at)) => Some(Session { token, expired_at }),
      _ => None,
    };
    User {
      username:      self.username,
      password_hash: self.password_hash,
      name:          self.name,
      session,
    }
  }
}

pub fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
  RawUser::from_row(row).map(RawUser::into_user)
}

// ─── Contacts ────────────────────────────────────────────────────────────────

pub const CONTACT_COLUMNS: &str = "id, username, first_name, last_name, email, phone";

pub fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
  Ok(Contact {
    id:         row.get(0)?,
    owner:      row.get(1)?,
    first_name: row.get(2)?,
    last_name:  row.get(3)?,
    email:      row.get(4)?,
    phone:      row.get(5)?,
  })
}

// ─── Addresses ───────────────────────────────────────────────────────────────

pub const ADDRESS_COLUMNS: &str =
  "id, contact_id, street, city, province, country, postal_code";

pub fn address_from_row(row: &Row<'_>) -> rusqlite::Result<Address> {
  Ok(Address {
    id:          row.get(0)?,
    contact_id:  row.get(1)?,
    street:      row.get(2)?,
    city:        row.get(3)?,
    province:    row.get(4)?,
    country:     row.get(5)?,
    postal_code: row.get(6)?,
  })
}
