//! Core types and trait definitions for the Rolodex contact service.
//!
//! This crate has no HTTP or database dependencies.
//! The storage backend and the API layer both depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod address;
pub mod contact;
pub mod error;
pub mod page;
pub mod store;
pub mod user;
pub mod validate;

mod patch;

pub use error::{Error, Result};
