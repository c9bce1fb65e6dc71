//! The `Store` trait and its error contract.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  Error,
  address::{Address, AddressPatch, NewAddress},
  contact::{Contact, ContactFilter, ContactPatch, NewContact},
  page::Page,
  user::{Session, User, UserChanges},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Implemented by backend error types so callers can separate domain
/// failures (not found, duplicate username) from infrastructure failures.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error this represents, or `None` for an infrastructure fault.
  fn domain(&self) -> Option<&Error>;
}

impl StoreError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Rolodex storage backend.
///
/// Every method is one atomic unit of work: ownership resolution and the
/// mutation it guards either both happen or neither does.
///
/// Contact and address methods take the requesting user's `username` and
/// resolve the owning chain (user → contact → address) themselves. A contact
/// owned by another user fails with [`Error::ContactNotFound`], exactly like
/// a contact that does not exist.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait Store: Send + Sync {
  type Error: StoreError;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user. Fails with [`Error::UsernameTaken`] on a duplicate.
  fn create_user(
    &self,
    user: User,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Look a user up by username. Returns `None` if not found.
  fn get_user<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Look a user up by session token, regardless of expiry.
  fn find_user_by_token<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Apply profile changes and return the updated user.
  fn update_user<'a>(
    &'a self,
    username: &'a str,
    changes: UserChanges,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  /// Replace the user's session; `None` clears token and expiry.
  fn set_session<'a>(
    &'a self,
    username: &'a str,
    session: Option<Session>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Contacts ──────────────────────────────────────────────────────────

  fn create_contact<'a>(
    &'a self,
    username: &'a str,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + 'a;

  fn get_contact<'a>(
    &'a self,
    username: &'a str,
    id: i64,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + 'a;

  /// Merge `patch` into the contact and return the stored result.
  fn update_contact<'a>(
    &'a self,
    username: &'a str,
    id: i64,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + 'a;

  /// Delete the contact together with its addresses.
  fn delete_contact<'a>(
    &'a self,
    username: &'a str,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Filtered, paginated listing of the user's contacts, ordered by id.
  fn search_contacts<'a>(
    &'a self,
    username: &'a str,
    filter: &'a ContactFilter,
  ) -> impl Future<Output = Result<Page<Contact>, Self::Error>> + Send + 'a;

  // ── Addresses ─────────────────────────────────────────────────────────

  fn create_address<'a>(
    &'a self,
    username: &'a str,
    contact_id: i64,
    input: NewAddress,
  ) -> impl Future<Output = Result<Address, Self::Error>> + Send + 'a;

  fn get_address<'a>(
    &'a self,
    username: &'a str,
    contact_id: i64,
    address_id: i64,
  ) -> impl Future<Output = Result<Address, Self::Error>> + Send + 'a;

  fn update_address<'a>(
    &'a self,
    username: &'a str,
    contact_id: i64,
    address_id: i64,
    patch: AddressPatch,
  ) -> impl Future<Output = Result<Address, Self::Error>> + Send + 'a;

  fn delete_address<'a>(
    &'a self,
    username: &'a str,
    contact_id: i64,
    address_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Every address of the contact, ordered by id. Not paginated.
  fn list_addresses<'a>(
    &'a self,
    username: &'a str,
    contact_id: i64,
  ) -> impl Future<Output = Result<Vec<Address>, Self::Error>> + Send + 'a;
}
