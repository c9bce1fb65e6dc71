//! Merge-patch helpers shared by the contact, address and user patch types.
//!
//! A patch field is `None` when the key was absent (or JSON `null`): the
//! stored value is left alone. An empty string on an optional column clears
//! it. Required columns never reach these helpers with an empty string;
//! validation rejects that first.

/// Treat an empty string as "no value".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

pub(crate) fn merge_optional(slot: &mut Option<String>, value: Option<String>) {
  if let Some(v) = value {
    *slot = non_empty(Some(v));
  }
}

pub(crate) fn merge_required(slot: &mut String, value: Option<String>) {
  if let Some(v) = value {
    *slot = v;
  }
}
