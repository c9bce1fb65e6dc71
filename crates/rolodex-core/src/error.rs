//! Error types for `rolodex-core`.

use thiserror::Error;

/// Domain-level failures shared by every layer.
///
/// Storage backends wrap these so the API layer can map them onto HTTP
/// statuses without knowing which backend produced them.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Username already registered")]
  UsernameTaken,

  #[error("User not found")]
  UserNotFound,

  /// The contact is absent or owned by somebody else; the two cases are
  /// indistinguishable.
  #[error("Contact not found")]
  ContactNotFound,

  #[error("Address not found")]
  AddressNotFound,

  #[error("{0}")]
  Validation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
