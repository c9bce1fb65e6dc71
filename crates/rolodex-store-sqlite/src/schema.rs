//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    username         TEXT PRIMARY KEY,
    password_hash    TEXT NOT NULL,   -- argon2 PHC string
    name             TEXT NOT NULL,
    token            TEXT UNIQUE,     -- NULL when logged out
    token_expired_at INTEGER          -- epoch millis; NULL when logged out
);

-- AUTOINCREMENT so a deleted id is never handed out again.
CREATE TABLE IF NOT EXISTS contacts (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    username   TEXT NOT NULL REFERENCES users(username),
    first_name TEXT NOT NULL,
    last_name  TEXT,
    email      TEXT,
    phone      TEXT
);

CREATE TABLE IF NOT EXISTS addresses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id  INTEGER NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
    street      TEXT,
    city        TEXT,
    province    TEXT,
    country     TEXT NOT NULL,
    postal_code TEXT
);

CREATE INDEX IF NOT EXISTS contacts_owner_idx    ON contacts(username);
CREATE INDEX IF NOT EXISTS addresses_contact_idx ON addresses(contact_id);

PRAGMA user_version = 1;
";
