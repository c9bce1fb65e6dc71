//! Users, their credentials, and the session token carried on the user row.

use serde::Deserialize;

// ─── Stored user ─────────────────────────────────────────────────────────────

/// An account as persisted by the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  /// Unique login name; also the primary key.
  pub username:      String,
  /// argon2 PHC string, e.g. `$argon2id$v=19$…`. Never the plaintext.
  pub password_hash: String,
  pub name:          String,
  pub session:       Option<Session>,
}

impl User {
  /// A freshly registered user with no active session.
  pub fn new(username: String, password_hash: String, name: String) -> Self {
    Self { username, password_hash, name, session: None }
  }

  /// Whether the user's session token is still valid at `now_millis`.
  /// Expiry is exclusive: a token expiring exactly now is already dead.
  pub fn session_live_at(&self, now_millis: i64) -> bool {
    self
      .session
      .as_ref()
      .is_some_and(|s| s.expired_at > now_millis)
  }
}

/// The current session credential of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub token:      String,
  /// Expiry as epoch milliseconds.
  pub expired_at: i64,
}

/// Profile changes applied by [`crate::store::Store::update_user`]. The
/// password has already been hashed by the caller.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
  pub name:          Option<String>,
  pub password_hash: Option<String>,
}

impl User {
  pub fn apply(&mut self, changes: UserChanges) {
    crate::patch::merge_required(&mut self.name, changes.name);
    crate::patch::merge_required(&mut self.password_hash, changes.password_hash);
  }
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Body of `POST /api/users`. Missing keys deserialise as empty strings so
/// that validation, not JSON parsing, reports them.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
  #[serde(default)]
  pub name:     String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

/// Body of `PATCH /api/users/current`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
  pub name:     Option<String>,
  pub password: Option<String>,
}
