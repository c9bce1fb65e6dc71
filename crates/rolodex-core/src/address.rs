//! Postal addresses attached to a contact.

use serde::Deserialize;

use crate::patch::{merge_optional, merge_required, non_empty};

/// A persisted address. Reachable only through its owning contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
  pub id:          i64,
  pub contact_id:  i64,
  pub street:      Option<String>,
  pub city:        Option<String>,
  /// State, province, or region.
  pub province:    Option<String>,
  pub country:     String,
  pub postal_code: Option<String>,
}

impl Address {
  /// Merge `patch` into this address, leaving absent fields untouched.
  pub fn apply(&mut self, patch: AddressPatch) {
    merge_optional(&mut self.street, patch.street);
    merge_optional(&mut self.city, patch.city);
    merge_optional(&mut self.province, patch.province);
    merge_required(&mut self.country, patch.country);
    merge_optional(&mut self.postal_code, patch.postal_code);
  }
}

/// Body of `POST /api/contacts/{id}/addresses`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
  pub street:      Option<String>,
  pub city:        Option<String>,
  pub province:    Option<String>,
  #[serde(default)]
  pub country:     String,
  pub postal_code: Option<String>,
}

impl NewAddress {
  pub fn into_address(self, contact_id: i64) -> Address {
    Address {
      id: 0,
      contact_id,
      street:      non_empty(self.street),
      city:        non_empty(self.city),
      province:    non_empty(self.province),
      country:     self.country,
      postal_code: non_empty(self.postal_code),
    }
  }
}

/// Body of `PUT /api/contacts/{id}/addresses/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
  pub street:      Option<String>,
  pub city:        Option<String>,
  pub province:    Option<String>,
  pub country:     Option<String>,
  pub postal_code: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn patch_merges_present_fields_only() {
    let mut a = NewAddress {
      street:      Some("Jalan 1".into()),
      city:        Some("Jakarta".into()),
      country:     "Indonesia".into(),
      postal_code: Some("12356".into()),
      ..Default::default()
    }
    .into_address(7);

    let patch: AddressPatch =
      serde_json::from_str(r#"{"city":"Bandung","postalCode":""}"#).unwrap();
    a.apply(patch);

    assert_eq!(a.contact_id, 7);
    assert_eq!(a.street.as_deref(), Some("Jalan 1"));
    assert_eq!(a.city.as_deref(), Some("Bandung"));
    assert_eq!(a.country, "Indonesia");
    assert_eq!(a.postal_code, None);
  }
}
