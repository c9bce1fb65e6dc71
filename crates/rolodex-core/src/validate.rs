//! Structural validation of inbound payloads.
//!
//! Checks are local and synchronous. All violations of one payload are
//! collected and reported together as a single [`Error::Validation`].

use crate::{
  Error, Result,
  address::{AddressPatch, NewAddress},
  contact::{ContactFilter, ContactPatch, NewContact},
  user::{LoginUser, RegisterUser, UpdateUser},
};

/// A payload that can check its own structural constraints.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

// ─── Rule collector ──────────────────────────────────────────────────────────

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
  /// A field that must be present and non-blank.
  fn required(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
    if value.trim().is_empty() {
      self.0.push(format!("{field} must not be blank"));
    } else {
      self.max_len(field, value, max);
    }
    self
  }

  /// A patch of a required field: may be absent, but not blank.
  fn not_blank_if_present(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
    if let Some(v) = value {
      self.required(field, v, max);
    }
    self
  }

  fn optional(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
    if let Some(v) = value {
      self.max_len(field, v, max);
    }
    self
  }

  fn email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
    if let Some(v) = value.filter(|v| !v.is_empty())
      && !is_email(v)
    {
      self.0.push(format!("{field} must be a well-formed email address"));
    }
    self
  }

  fn at_least(&mut self, field: &str, value: u32, min: u32) -> &mut Self {
    if value < min {
      self.0.push(format!("{field} must be greater than or equal to {min}"));
    }
    self
  }

  fn max_len(&mut self, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
      self.0.push(format!("{field} size must be between 0 and {max}"));
    }
  }

  fn finish(&mut self) -> Result<()> {
    if self.0.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation(self.0.join(", ")))
    }
  }
}

fn is_email(s: &str) -> bool {
  if s.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
    && !domain.contains("..")
}

// ─── Users ───────────────────────────────────────────────────────────────────

impl Validate for RegisterUser {
  fn validate(&self) -> Result<()> {
    Violations::default()
      .required("username", &self.username, 100)
      .required("password", &self.password, 100)
      .required("name", &self.name, 100)
      .finish()
  }
}

impl Validate for LoginUser {
  fn validate(&self) -> Result<()> {
    Violations::default()
      .required("username", &self.username, 100)
      .required("password", &self.password, 100)
      .finish()
  }
}

impl Validate for UpdateUser {
  fn validate(&self) -> Result<()> {
    Violations::default()
      .not_blank_if_present("name", self.name.as_deref(), 100)
      .not_blank_if_present("password", self.password.as_deref(), 100)
      .finish()
  }
}

// ─── Contacts ────────────────────────────────────────────────────────────────

impl Validate for NewContact {
  fn validate(&self) -> Result<()> {
    Violations::default()
      .required("firstName", &self.first_name, 100)
      .optional("lastName", self.last_name.as_deref(), 100)
      .optional("email", self.email.as_deref(), 100)
      .email("email", self.email.as_deref())
      .optional("phone", self.phone.as_deref(), 100)
      .finish()
  }
}

impl Validate for ContactPatch {
  fn validate(&self) -> Result<()> {
    Violations::default()
      .not_blank_if_present("firstName", self.first_name.as_deref(), 100)
      .optional("lastName", self.last_name.as_deref(), 100)
      .optional("email", self.email.as_deref(), 100)
      .email("email", self.email.as_deref())
      .optional("phone", self.phone.as_deref(), 100)
      .finish()
  }
}

impl Validate for ContactFilter {
  fn validate(&self) -> Result<()> {
    Violations::default().at_least("size", self.size, 1).finish()
  }
}

// ─── Addresses ───────────────────────────────────────────────────────────────

impl Validate for NewAddress {
  fn validate(&self) -> Result<()> {
    Violations::default()
      .optional("street", self.street.as_deref(), 200)
      .optional("city", self.city.as_deref(), 100)
      .optional("province", self.province.as_deref(), 100)
      .required("country", &self.country, 100)
      .optional("postalCode", self.postal_code.as_deref(), 10)
      .finish()
  }
}

impl Validate for AddressPatch {
  fn validate(&self) -> Result<()> {
    Violations::default()
      .optional("street", self.street.as_deref(), 200)
      .optional("city", self.city.as_deref(), 100)
      .optional("province", self.province.as_deref(), 100)
      .not_blank_if_present("country", self.country.as_deref(), 100)
      .optional("postalCode", self.postal_code.as_deref(), 10)
      .finish()
  }
}
