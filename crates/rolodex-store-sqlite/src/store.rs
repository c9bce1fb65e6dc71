//! [`SqliteStore`], the SQLite implementation of [`Store`].

use std::path::Path;

use rolodex_core::{
  address::{Address, AddressPatch, NewAddress},
  contact::{Contact, ContactFilter, ContactPatch, NewContact},
  page::Page,
  store::Store,
  user::{Session, User, UserChanges},
};
use rusqlite::{Connection, OptionalExtension as _, TransactionBehavior, params};

use crate::{
  Result,
  query::{WhereClause, contact_predicates},
  rows::{
    ADDRESS_COLUMNS, CONTACT_COLUMNS, USER_COLUMNS, address_from_row,
    contact_from_row, user_from_row,
  },
  schema::SCHEMA,
};

/// What a unit of work decided: a value to commit, or a domain error that
/// rolls the transaction back.
type Outcome<T> = std::result::Result<T, rolodex_core::Error>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolodex store backed by a single SQLite file.
///
/// Cloning shares the inner reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `work` inside one transaction. The transaction commits only when
  /// `work` returns `Ok(Ok(_))`; a domain error or a database error rolls it
  /// back.
  async fn transact<T, F>(&self, behavior: TransactionBehavior, work: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Connection) -> rusqlite::Result<Outcome<T>> + Send + 'static,
  {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(behavior)?;
        let outcome = work(&tx)?;
        if outcome.is_ok() {
          tx.commit()?;
        }
        Ok(outcome)
      })
      .await?;
    Ok(outcome?)
  }

  async fn write<T, F>(&self, work: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Connection) -> rusqlite::Result<Outcome<T>> + Send + 'static,
  {
    self.transact(TransactionBehavior::Immediate, work).await
  }

  async fn read<T, F>(&self, work: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Connection) -> rusqlite::Result<Outcome<T>> + Send + 'static,
  {
    self.transact(TransactionBehavior::Deferred, work).await
  }

  #[cfg(test)]
  pub(crate) async fn count_rows(&self, table: &'static str) -> Result<i64> {
    self
      .read(move |conn| {
        let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
        Ok(Ok(n))
      })
      .await
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn load_user(conn: &Connection, username: &str) -> rusqlite::Result<Option<User>> {
  conn
    .query_row(
      &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
      params![username],
      user_from_row,
    )
    .optional()
}

/// Resolve a contact through its owner; `None` covers both "absent" and
/// "owned by someone else".
fn load_contact(conn: &Connection, username: &str, id: i64) -> rusqlite::Result<Option<Contact>> {
  conn
    .query_row(
      &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1 AND username = ?2"),
      params![id, username],
      contact_from_row,
    )
    .optional()
}

fn load_address(
  conn: &Connection,
  contact_id: i64,
  address_id: i64,
) -> rusqlite::Result<Option<Address>> {
  conn
    .query_row(
      &format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?1 AND contact_id = ?2"),
      params![address_id, contact_id],
      address_from_row,
    )
    .optional()
}

/// Walk the full owning chain user → contact → address.
fn resolve_address(
  conn: &Connection,
  username: &str,
  contact_id: i64,
  address_id: i64,
) -> rusqlite::Result<Outcome<Address>> {
  let Some(contact) = load_contact(conn, username, contact_id)? else {
    return Ok(Err(rolodex_core::Error::ContactNotFound));
  };
  Ok(load_address(conn, contact.id, address_id)?.ok_or(rolodex_core::Error::AddressNotFound))
}

// ─── Store impl ──────────────────────────────────────────────────────────────

impl Store for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, user: User) -> Result<User> {
    self
      .write(move |conn| {
        if load_user(conn, &user.username)?.is_some() {
          return Ok(Err(rolodex_core::Error::UsernameTaken));
        }
        let (token, expired_at) = match &user.session {
          Some(s) => (Some(s.token.clone()), Some(s.expired_at)),
          None => (None, None),
        };
        conn.execute(
          "INSERT INTO users (username, password_hash, name, token, token_expired_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          params![user.username, user.password_hash, user.name, token, expired_at],
        )?;
        Ok(Ok(user))
      })
      .await
  }

  async fn get_user(&self, username: &str) -> Result<Option<User>> {
    let username = username.to_owned();
    self.read(move |conn| Ok(Ok(load_user(conn, &username)?))).await
  }

  async fn find_user_by_token(&self, token: &str) -> Result<Option<User>> {
    let token = token.to_owned();
    self
      .read(move |conn| {
        let user = conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE token = ?1"),
            params![token],
            user_from_row,
          )
          .optional()?;
        Ok(Ok(user))
      })
      .await
  }

  async fn update_user(&self, username: &str, changes: UserChanges) -> Result<User> {
    let username = username.to_owned();
    self
      .write(move |conn| {
        let Some(mut user) = load_user(conn, &username)? else {
          return Ok(Err(rolodex_core::Error::UserNotFound));
        };
        user.apply(changes);
        conn.execute(
          "UPDATE users SET name = ?1, password_hash = ?2 WHERE username = ?3",
          params![user.name, user.password_hash, user.username],
        )?;
        Ok(Ok(user))
      })
      .await
  }

  async fn set_session(&self, username: &str, session: Option<Session>) -> Result<()> {
    let username = username.to_owned();
    let (token, expired_at) = match session {
      Some(s) => (Some(s.token), Some(s.expired_at)),
      None => (None, None),
    };
    self
      .write(move |conn| {
        let changed = conn.execute(
          "UPDATE users SET token = ?1, token_expired_at = ?2 WHERE username = ?3",
          params![token, expired_at, username],
        )?;
        if changed == 0 {
          return Ok(Err(rolodex_core::Error::UserNotFound));
        }
        Ok(Ok(()))
      })
      .await
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn create_contact(&self, username: &str, input: NewContact) -> Result<Contact> {
    let mut contact = input.into_contact(username);
    self
      .write(move |conn| {
        conn.execute(
          "INSERT INTO contacts (username, first_name, last_name, email, phone)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          params![
            contact.owner,
            contact.first_name,
            contact.last_name,
            contact.email,
            contact.phone,
          ],
        )?;
        contact.id = conn.last_insert_rowid();
        Ok(Ok(contact))
      })
      .await
  }

  async fn get_contact(&self, username: &str, id: i64) -> Result<Contact> {
    let username = username.to_owned();
    self
      .read(move |conn| {
        Ok(load_contact(conn, &username, id)?.ok_or(rolodex_core::Error::ContactNotFound))
      })
      .await
  }

  async fn update_contact(
    &self,
    username: &str,
    id: i64,
    patch: ContactPatch,
  ) -> Result<Contact> {
    let username = username.to_owned();
    self
      .write(move |conn| {
        let Some(mut contact) = load_contact(conn, &username, id)? else {
          return Ok(Err(rolodex_core::Error::ContactNotFound));
        };
        contact.apply(patch);
        conn.execute(
          "UPDATE contacts SET first_name = ?1, last_name = ?2, email = ?3, phone = ?4
           WHERE id = ?5",
          params![
            contact.first_name,
            contact.last_name,
            contact.email,
            contact.phone,
            contact.id,
          ],
        )?;
        Ok(Ok(contact))
      })
      .await
  }

  async fn delete_contact(&self, username: &str, id: i64) -> Result<()> {
    let username = username.to_owned();
    self
      .write(move |conn| {
        let deleted = conn.execute(
          "DELETE FROM contacts WHERE id = ?1 AND username = ?2",
          params![id, username],
        )?;
        if deleted == 0 {
          return Ok(Err(rolodex_core::Error::ContactNotFound));
        }
        Ok(Ok(()))
      })
      .await
  }

  async fn search_contacts(
    &self,
    username: &str,
    filter: &ContactFilter,
  ) -> Result<Page<Contact>> {
    let clause = WhereClause::build(&contact_predicates(username, filter));
    let page = filter.page;
    let size = filter.size;

    self
      .read(move |conn| {
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM contacts WHERE {}", clause.sql),
          rusqlite::params_from_iter(clause.params.iter()),
          |r| r.get(0),
        )?;

        let limit_idx = clause.next_param();
        let sql = format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts
           WHERE {}
           ORDER BY id
           LIMIT ?{limit_idx} OFFSET ?{}",
          clause.sql,
          limit_idx + 1,
        );
        let mut params = clause.params;
        params.push(i64::from(size).into());
        // Past the last row is an empty page, not an overflow.
        params.push(i64::from(page).saturating_mul(i64::from(size)).into());

        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), contact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Ok(Page {
          items,
          total: u64::try_from(total).unwrap_or_default(),
          page,
          size,
        }))
      })
      .await
  }

  // ── Addresses ─────────────────────────────────────────────────────────────

  async fn create_address(
    &self,
    username: &str,
    contact_id: i64,
    input: NewAddress,
  ) -> Result<Address> {
    let username = username.to_owned();
    self
      .write(move |conn| {
        let Some(contact) = load_contact(conn, &username, contact_id)? else {
          return Ok(Err(rolodex_core::Error::ContactNotFound));
        };
        let mut address = input.into_address(contact.id);
        conn.execute(
          "INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          params![
            address.contact_id,
            address.street,
            address.city,
            address.province,
            address.country,
            address.postal_code,
          ],
        )?;
        address.id = conn.last_insert_rowid();
        Ok(Ok(address))
      })
      .await
  }

  async fn get_address(
    &self,
    username: &str,
    contact_id: i64,
    address_id: i64,
  ) -> Result<Address> {
    let username = username.to_owned();
    self
      .read(move |conn| resolve_address(conn, &username, contact_id, address_id))
      .await
  }

  async fn update_address(
    &self,
    username: &str,
    contact_id: i64,
    address_id: i64,
    patch: AddressPatch,
  ) -> Result<Address> {
    let username = username.to_owned();
    self
      .write(move |conn| {
        let mut address = match resolve_address(conn, &username, contact_id, address_id)? {
          Ok(a) => a,
          Err(e) => return Ok(Err(e)),
        };
        address.apply(patch);
        conn.execute(
          "UPDATE addresses
           SET street = ?1, city = ?2, province = ?3, country = ?4, postal_code = ?5
           WHERE id = ?6",
          params![
            address.street,
            address.city,
            address.province,
            address.country,
            address.postal_code,
            address.id,
          ],
        )?;
        Ok(Ok(address))
      })
      .await
  }

  async fn delete_address(
    &self,
    username: &str,
    contact_id: i64,
    address_id: i64,
  ) -> Result<()> {
    let username = username.to_owned();
    self
      .write(move |conn| {
        let address = match resolve_address(conn, &username, contact_id, address_id)? {
          Ok(a) => a,
          Err(e) => return Ok(Err(e)),
        };
        conn.execute("DELETE FROM addresses WHERE id = ?1", params![address.id])?;
        Ok(Ok(()))
      })
      .await
  }

  async fn list_addresses(&self, username: &str, contact_id: i64) -> Result<Vec<Address>> {
    let username = username.to_owned();
    self
      .read(move |conn| {
        let Some(contact) = load_contact(conn, &username, contact_id)? else {
          return Ok(Err(rolodex_core::Error::ContactNotFound));
        };
        let mut stmt = conn.prepare(&format!(
          "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE contact_id = ?1 ORDER BY id"
        ))?;
        let addresses = stmt
          .query_map(params![contact.id], address_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Ok(addresses))
      })
      .await
  }
}
