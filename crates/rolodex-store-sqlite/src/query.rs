//! WHERE-clause builder for contact search.
//!
//! A search is an ordered list of [`Predicate`]s joined by `AND`. Each
//! predicate renders to one SQL fragment bound to exactly one positional
//! parameter, so the clause and its parameter list are built side by side.

use rolodex_core::contact::ContactFilter;
use rusqlite::types::Value;

/// One conjunct of a contact search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
  /// Always present: the contact belongs to this username.
  Owner(String),
  /// Substring of the first name or the last name.
  Name(String),
  Email(String),
  Phone(String),
}

impl Predicate {
  /// Render this predicate against parameter `?{n}`.
  ///
  /// `instr` is used rather than `LIKE` because SQLite's `LIKE` folds ASCII
  /// case and treats `%`/`_` in the needle as wildcards.
  fn sql(&self, n: usize) -> String {
    match self {
      Self::Owner(_) => format!("username = ?{n}"),
      Self::Name(_) => {
        format!("(instr(first_name, ?{n}) > 0 OR instr(last_name, ?{n}) > 0)")
      }
      Self::Email(_) => format!("instr(email, ?{n}) > 0"),
      Self::Phone(_) => format!("instr(phone, ?{n}) > 0"),
    }
  }

  fn value(&self) -> Value {
    match self {
      Self::Owner(v) | Self::Name(v) | Self::Email(v) | Self::Phone(v) => {
        Value::Text(v.clone())
      }
    }
  }
}

/// The predicates for `filter`, owner first, then name, email and phone.
pub fn contact_predicates(username: &str, filter: &ContactFilter) -> Vec<Predicate> {
  let mut preds = vec![Predicate::Owner(username.to_owned())];
  if let Some(name) = filter.name() {
    preds.push(Predicate::Name(name.to_owned()));
  }
  if let Some(email) = filter.email() {
    preds.push(Predicate::Email(email.to_owned()));
  }
  if let Some(phone) = filter.phone() {
    preds.push(Predicate::Phone(phone.to_owned()));
  }
  preds
}

/// A rendered `WHERE` body and its positional parameters (`?1`, `?2`, …).
#[derive(Debug)]
pub struct WhereClause {
  pub sql:    String,
  pub params: Vec<Value>,
}

impl WhereClause {
  pub fn build(preds: &[Predicate]) -> Self {
    let sql = preds
      .iter()
      .enumerate()
      .map(|(i, p)| p.sql(i + 1))
      .collect::<Vec<_>>()
      .join(" AND ");
    let params = preds.iter().map(Predicate::value).collect();
    Self { sql, params }
  }

  /// The index the next appended parameter will take.
  pub fn next_param(&self) -> usize { self.params.len() + 1 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn owner_only_without_filters() {
    let preds = contact_predicates("alice", &ContactFilter::default());
    assert_eq!(preds, vec![Predicate::Owner("alice".into())]);

    let w = WhereClause::build(&preds);
    assert_eq!(w.sql, "username = ?1");
    assert_eq!(w.params, vec![Value::Text("alice".into())]);
    assert_eq!(w.next_param(), 2);
  }

  #[test]
  fn filters_are_anded_in_order() {
    let filter = ContactFilter {
      name: Some("Smith".into()),
      phone: Some("0812".into()),
      ..Default::default()
    };
    let w = WhereClause::build(&contact_predicates("alice", &filter));
    assert_eq!(
      w.sql,
      "username = ?1 AND (instr(first_name, ?2) > 0 OR instr(last_name, ?2) > 0) \
       AND instr(phone, ?3) > 0"
    );
    assert_eq!(
      w.params,
      vec![
        Value::Text("alice".into()),
        Value::Text("Smith".into()),
        Value::Text("0812".into()),
      ]
    );
  }

  #[test]
  fn empty_filter_strings_add_no_predicate() {
    let filter = ContactFilter { email: Some(String::new()), ..Default::default() };
    assert_eq!(contact_predicates("alice", &filter).len(), 1);
  }
}
