//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by any [`Store`]. Every response, error
//! or not, is wrapped in the `{data?, errors?, paging?}` envelope.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = rolodex_api::router(state); // everything under /api
//! ```

pub mod auth;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod password;


pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post},
};
use rolodex_core::store::Store;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{addresses, contacts, session, users};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROLODEX_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// Lifetime of a login token.
  #[serde(default = "default_token_ttl_days")]
  pub token_ttl_days: u32,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("rolodex.sqlite3") }
fn default_token_ttl_days() -> u32 { 30 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           default_host(),
      port:           default_port(),
      store_path:     default_store_path(),
      token_ttl_days: default_token_ttl_days(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: Store> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API routes, relative to their mount point.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: Store + Clone + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::register::<S>))
    .route("/users/current", get(users::current).patch(users::update::<S>))
    // Session
    .route("/auth/login", post(session::login::<S>))
    .route("/auth/logout", delete(session::logout::<S>))
    // Contacts
    .route("/contacts", get(contacts::search::<S>).post(contacts::create::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    // Addresses
    .route(
      "/contacts/{contact_id}/addresses",
      get(addresses::list::<S>).post(addresses::create::<S>),
    )
    .route(
      "/contacts/{contact_id}/addresses/{address_id}",
      get(addresses::get_one::<S>)
        .put(addresses::update::<S>)
        .delete(addresses::delete::<S>),
    )
    .method_not_allowed_fallback(handlers::method_not_allowed)
    .with_state(state)
}

/// Build the complete application: the API under `/api`, an enveloped 404
/// for anything else, and request tracing.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: Store + Clone + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .fallback(handlers::not_found)
    .layer(TraceLayer::new_for_http())
}
