//! Integration tests for `SqliteStore` against an in-memory database.

use rolodex_core::{
  Error as CoreError,
  address::{AddressPatch, NewAddress},
  contact::{ContactFilter, ContactPatch, NewContact},
  store::Store,
  user::{Session, User, UserChanges},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn store_with_users() -> SqliteStore {
  let s = store().await;
  s.create_user(user("alice")).await.unwrap();
  s.create_user(user("bob")).await.unwrap();
  s
}

fn user(username: &str) -> User {
  User::new(username.into(), format!("hash-of-{username}"), username.to_uppercase())
}

fn new_contact(first: &str, last: Option<&str>) -> NewContact {
  NewContact {
    first_name: first.into(),
    last_name:  last.map(Into::into),
    email:      None,
    phone:      None,
  }
}

fn new_address(country: &str) -> NewAddress {
  NewAddress {
    street:      Some("Jalan Sudirman 1".into()),
    city:        Some("Jakarta".into()),
    province:    Some("DKI Jakarta".into()),
    country:     country.into(),
    postal_code: Some("12356".into()),
  }
}

fn is_core(err: &Error, expected: fn(&CoreError) -> bool) -> bool {
  matches!(err, Error::Core(e) if expected(e))
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_user() {
  let s = store().await;
  s.create_user(user("alice")).await.unwrap();

  let fetched = s.get_user("alice").await.unwrap().unwrap();
  assert_eq!(fetched.username, "alice");
  assert_eq!(fetched.password_hash, "hash-of-alice");
  assert_eq!(fetched.name, "ALICE");
  assert_eq!(fetched.session, None);
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
  let s = store().await;
  s.create_user(user("alice")).await.unwrap();
  let err = s.create_user(user("alice")).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::UsernameTaken)), "{err:?}");
}

#[tokio::test]
async fn session_set_find_and_clear() {
  let s = store_with_users().await;
  let session = Session { token: "tok-123".into(), expired_at: 42 };
  s.set_session("alice", Some(session.clone())).await.unwrap();

  let found = s.find_user_by_token("tok-123").await.unwrap().unwrap();
  assert_eq!(found.username, "alice");
  assert_eq!(found.session, Some(session));

  s.set_session("alice", None).await.unwrap();
  assert!(s.find_user_by_token("tok-123").await.unwrap().is_none());
  assert_eq!(s.get_user("alice").await.unwrap().unwrap().session, None);
}

#[tokio::test]
async fn set_session_for_unknown_user_fails() {
  let s = store().await;
  let err = s.set_session("ghost", None).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::UserNotFound)));
}

#[tokio::test]
async fn update_user_merges_changes() {
  let s = store_with_users().await;
  let updated = s
    .update_user("alice", UserChanges { name: Some("Alicia".into()), password_hash: None })
    .await
    .unwrap();
  assert_eq!(updated.name, "Alicia");
  assert_eq!(updated.password_hash, "hash-of-alice");

  let stored = s.get_user("alice").await.unwrap().unwrap();
  assert_eq!(stored, updated);
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_contact_roundtrip() {
  let s = store_with_users().await;
  let input = NewContact {
    first_name: "Ada".into(),
    last_name:  Some("Lovelace".into()),
    email:      Some("ada@example.com".into()),
    phone:      Some("0812345".into()),
  };
  let created = s.create_contact("alice", input).await.unwrap();
  assert!(created.id > 0);

  let fetched = s.get_contact("alice", created.id).await.unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.owner, "alice");
  assert_eq!(fetched.email.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn contact_of_other_user_is_not_found() {
  let s = store_with_users().await;
  let c = s.create_contact("alice", new_contact("Ada", None)).await.unwrap();

  let err = s.get_contact("bob", c.id).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::ContactNotFound)));

  let err = s.update_contact("bob", c.id, ContactPatch::default()).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::ContactNotFound)));

  let err = s.delete_contact("bob", c.id).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::ContactNotFound)));

  // Still there for its owner.
  assert!(s.get_contact("alice", c.id).await.is_ok());
}

#[tokio::test]
async fn update_contact_only_touches_present_fields() {
  let s = store_with_users().await;
  let input = NewContact {
    first_name: "Ada".into(),
    last_name:  Some("Byron".into()),
    email:      Some("ada@example.com".into()),
    phone:      Some("0812".into()),
  };
  let c = s.create_contact("alice", input).await.unwrap();

  let patch = ContactPatch { last_name: Some("X".into()), ..Default::default() };
  let updated = s.update_contact("alice", c.id, patch).await.unwrap();
  assert_eq!(updated.first_name, "Ada");
  assert_eq!(updated.last_name.as_deref(), Some("X"));
  assert_eq!(updated.email.as_deref(), Some("ada@example.com"));
  assert_eq!(updated.phone.as_deref(), Some("0812"));

  assert_eq!(s.get_contact("alice", c.id).await.unwrap(), updated);
}

#[tokio::test]
async fn delete_contact_cascades_to_addresses() {
  let s = store_with_users().await;
  let c = s.create_contact("alice", new_contact("Ada", None)).await.unwrap();
  s.create_address("alice", c.id, new_address("Indonesia")).await.unwrap();
  s.create_address("alice", c.id, new_address("Japan")).await.unwrap();
  assert_eq!(s.count_rows("addresses").await.unwrap(), 2);

  s.delete_contact("alice", c.id).await.unwrap();
  assert_eq!(s.count_rows("addresses").await.unwrap(), 0);

  let err = s.get_contact("alice", c.id).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::ContactNotFound)));
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_empty_store() {
  let s = store_with_users().await;
  let page = s.search_contacts("alice", &ContactFilter::default()).await.unwrap();
  assert!(page.items.is_empty());
  assert_eq!(page.total, 0);
  assert_eq!(page.total_pages(), 0);
  assert_eq!(page.page, 0);
  assert_eq!(page.size, 10);
}

#[tokio::test]
async fn search_by_name_matches_first_or_last_case_sensitively() {
  let s = store_with_users().await;
  s.create_contact("alice", new_contact("John", Some("Smith"))).await.unwrap();
  s.create_contact("alice", new_contact("Smithers", None)).await.unwrap();
  s.create_contact("alice", new_contact("Jane", Some("smith"))).await.unwrap();
  s.create_contact("alice", new_contact("Mary", Some("Jones"))).await.unwrap();
  s.create_contact("bob", new_contact("Bob", Some("Smith"))).await.unwrap();

  let filter = ContactFilter { name: Some("Smith".into()), ..Default::default() };
  let page = s.search_contacts("alice", &filter).await.unwrap();

  let names: Vec<_> = page.items.iter().map(|c| c.first_name.as_str()).collect();
  assert_eq!(names, ["John", "Smithers"]);
  assert_eq!(page.total, 2);
  assert!(page.items.iter().all(|c| c.owner == "alice"));
}

#[tokio::test]
async fn search_filters_are_conjunctive() {
  let s = store_with_users().await;
  let mk = |first: &str, email: &str, phone: &str| NewContact {
    first_name: first.into(),
    last_name:  None,
    email:      Some(email.into()),
    phone:      Some(phone.into()),
  };
  s.create_contact("alice", mk("A", "a@work.com", "0811")).await.unwrap();
  s.create_contact("alice", mk("B", "b@work.com", "0922")).await.unwrap();
  s.create_contact("alice", mk("C", "c@home.com", "0811")).await.unwrap();

  let filter = ContactFilter {
    email: Some("@work".into()),
    phone: Some("081".into()),
    ..Default::default()
  };
  let page = s.search_contacts("alice", &filter).await.unwrap();
  assert_eq!(page.items.len(), 1);
  assert_eq!(page.items[0].first_name, "A");
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
  let s = store_with_users().await;
  s.create_contact("alice", new_contact("100%", None)).await.unwrap();
  s.create_contact("alice", new_contact("1000", None)).await.unwrap();

  let filter = ContactFilter { name: Some("0%".into()), ..Default::default() };
  let page = s.search_contacts("alice", &filter).await.unwrap();
  assert_eq!(page.items.len(), 1);
  assert_eq!(page.items[0].first_name, "100%");
}

#[tokio::test]
async fn search_paginates_in_id_order() {
  let s = store_with_users().await;
  for i in 0..25 {
    s.create_contact("alice", new_contact(&format!("C{i:02}"), None)).await.unwrap();
  }

  let filter = ContactFilter { page: 2, size: 10, ..Default::default() };
  let page = s.search_contacts("alice", &filter).await.unwrap();
  assert_eq!(page.total, 25);
  assert_eq!(page.total_pages(), 3);
  assert_eq!(page.page, 2);
  let names: Vec<_> = page.items.iter().map(|c| c.first_name.clone()).collect();
  assert_eq!(names, ["C20", "C21", "C22", "C23", "C24"]);

  let past_end = ContactFilter { page: 9, size: 10, ..Default::default() };
  let page = s.search_contacts("alice", &past_end).await.unwrap();
  assert!(page.items.is_empty());
  assert_eq!(page.total, 25);
}

#[tokio::test]
async fn search_with_maximal_page_and_size_is_empty() {
  let s = store_with_users().await;
  s.create_contact("alice", new_contact("Ada", None)).await.unwrap();

  let filter = ContactFilter { page: u32::MAX, size: u32::MAX, ..Default::default() };
  let page = s.search_contacts("alice", &filter).await.unwrap();
  assert!(page.items.is_empty());
  assert_eq!(page.total, 1);
  assert_eq!(page.page, u32::MAX);

  let page = s.search_contacts("alice", &ContactFilter::default()).await.unwrap();
  assert_eq!(page.items.len(), 1);
}

// ─── Addresses ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn address_crud_through_owning_contact() {
  let s = store_with_users().await;
  let c = s.create_contact("alice", new_contact("Ada", None)).await.unwrap();

  let a = s.create_address("alice", c.id, new_address("Indonesia")).await.unwrap();
  assert_eq!(a.contact_id, c.id);
  assert_eq!(s.get_address("alice", c.id, a.id).await.unwrap(), a);

  let patch = AddressPatch { city: Some("Bandung".into()), ..Default::default() };
  let updated = s.update_address("alice", c.id, a.id, patch).await.unwrap();
  assert_eq!(updated.city.as_deref(), Some("Bandung"));
  assert_eq!(updated.country, "Indonesia");
  assert_eq!(updated.street.as_deref(), Some("Jalan Sudirman 1"));

  let listed = s.list_addresses("alice", c.id).await.unwrap();
  assert_eq!(listed, vec![updated]);

  s.delete_address("alice", c.id, a.id).await.unwrap();
  let err = s.delete_address("alice", c.id, a.id).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::AddressNotFound)));
}

#[tokio::test]
async fn create_address_under_missing_contact_persists_nothing() {
  let s = store_with_users().await;
  let err = s.create_address("alice", 99, new_address("Indonesia")).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::ContactNotFound)));
  assert_eq!(s.count_rows("addresses").await.unwrap(), 0);
}

#[tokio::test]
async fn address_of_other_users_contact_is_contact_not_found() {
  let s = store_with_users().await;
  let c = s.create_contact("alice", new_contact("Ada", None)).await.unwrap();
  let a = s.create_address("alice", c.id, new_address("Indonesia")).await.unwrap();

  let err = s.get_address("bob", c.id, a.id).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::ContactNotFound)));

  let err = s.list_addresses("bob", c.id).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::ContactNotFound)));
}

#[tokio::test]
async fn address_under_wrong_contact_is_address_not_found() {
  let s = store_with_users().await;
  let c1 = s.create_contact("alice", new_contact("Ada", None)).await.unwrap();
  let c2 = s.create_contact("alice", new_contact("Grace", None)).await.unwrap();
  let a = s.create_address("alice", c1.id, new_address("Indonesia")).await.unwrap();

  let err = s.get_address("alice", c2.id, a.id).await.unwrap_err();
  assert!(is_core(&err, |e| matches!(e, CoreError::AddressNotFound)));
}

#[tokio::test]
async fn list_addresses_empty() {
  let s = store_with_users().await;
  let c = s.create_contact("alice", new_contact("Ada", None)).await.unwrap();
  assert!(s.list_addresses("alice", c.id).await.unwrap().is_empty());
}
