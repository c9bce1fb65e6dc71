//! argon2 password hashing.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use std::sync::LazyLock;

use rand_core::OsRng;

use crate::error::ApiError;

/// Hash `password` into a PHC string with a fresh random salt.
pub fn hash(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}").into()))
}

/// Check `password` against a stored PHC string. An unparseable hash never
/// verifies.
pub fn verify(password: &str, hash: &str) -> bool {
  PasswordHash::new(hash).is_ok_and(|parsed| {
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  })
}

/// Stands in for a stored hash when the user does not exist, so a miss costs
/// the same argon2 work as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
  LazyLock::new(|| hash("rolodex-placeholder-password").ok());

/// Check `password` against `stored`, or against a placeholder hash when
/// there is nothing stored. Only a stored hash can verify.
pub fn verify_or_dummy(password: &str, stored: Option<&str>) -> bool {
  match stored {
    Some(h) => verify(password, h),
    None => {
      if let Some(dummy) = DUMMY_HASH.as_deref() {
        verify(password, dummy);
      }
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let h = hash("secret").unwrap();
    assert!(h.starts_with("$argon2"));
    assert!(verify("secret", &h));
    assert!(!verify("wrong", &h));
  }

  #[test]
  fn garbage_hash_does_not_verify() {
    assert!(!verify("secret", "not-a-phc-string"));
  }

  #[test]
  fn missing_hash_still_runs_argon2_and_fails() {
    let dummy = DUMMY_HASH.as_deref().unwrap();
    assert!(dummy.starts_with("$argon2"));
    assert!(verify("rolodex-placeholder-password", dummy));
    assert!(!verify_or_dummy("rolodex-placeholder-password", None));
  }

  #[test]
  fn stored_hash_verifies_through_verify_or_dummy() {
    let h = hash("secret").unwrap();
    assert!(verify_or_dummy("secret", Some(&h)));
    assert!(!verify_or_dummy("wrong", Some(&h)));
  }
}
