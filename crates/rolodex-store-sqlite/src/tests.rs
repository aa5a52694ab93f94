//! Integration tests for `SqliteStore` against an in-memory database.

use rolodex_core::{
  company::NewCompany,
  membership::NewMembership,
  person::NewPerson,
  store::DirectoryStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_company(name: &str) -> NewCompany {
  NewCompany {
    name:    name.into(),
    address: "1 Main Street".into(),
    city:    "Springfield".into(),
    country: "US".into(),
    email:   None,
    phone:   None,
  }
}

// ─── Companies ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_company() {
  let s = store().await;

  let created = s
    .create_company(NewCompany {
      email: Some("info@acme.example".into()),
      ..new_company("Acme")
    })
    .await
    .unwrap();
  assert!(created.id > 0);
  assert_eq!(created.created_at, created.updated_at);

  let fetched = s.get_company(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.email.as_deref(), Some("info@acme.example"));
  assert_eq!(fetched.phone, None);
}

#[tokio::test]
async fn get_company_missing_returns_none() {
  let s = store().await;
  assert!(s.get_company(999_999).await.unwrap().is_none());
}

#[tokio::test]
async fn create_company_rejects_invalid_input() {
  let s = store().await;

  let err = s
    .create_company(NewCompany {
      email: Some("not-an-email".into()),
      ..new_company("Acme")
    })
    .await
    .unwrap_err();

  match err {
    Error::Core(rolodex_core::Error::Validation(v)) => {
      assert!(v.has_field("email"));
    }
    other => panic!("expected validation error, got {other:?}"),
  }

  assert!(s.list_companies().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_companies_in_id_order() {
  let s = store().await;
  let a = s.create_company(new_company("Acme")).await.unwrap();
  let b = s.create_company(new_company("Globex")).await.unwrap();

  let all = s.list_companies().await.unwrap();
  assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![a.id, b.id]);
  assert_eq!(all[1].name, "Globex");
}

// ─── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let s = store().await;
  let person = s.create_person(NewPerson::new("Alice")).await.unwrap();

  let fetched = s.get_person(person.id).await.unwrap().unwrap();
  assert_eq!(fetched, person);
  assert!(s.get_person(person.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn create_person_rejects_empty_name() {
  let s = store().await;
  let err = s.create_person(NewPerson::new("")).await.unwrap_err();
  assert!(matches!(err, Error::Core(rolodex_core::Error::Validation(_))));
}

// ─── Memberships ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_list_and_remove_membership() {
  let s = store().await;
  let company = s.create_company(new_company("Acme")).await.unwrap();
  let person = s.create_person(NewPerson::new("Alice")).await.unwrap();

  let membership = s
    .add_membership(NewMembership {
      company_id: company.id,
      person_id:  person.id,
      role:       Some("CEO".into()),
    })
    .await
    .unwrap();
  assert_eq!(membership.role.as_deref(), Some("CEO"));

  let listed = s.list_memberships(company.id).await.unwrap();
  assert_eq!(listed, vec![membership.clone()]);

  let (_, members) = s
    .get_company_with_people(company.id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(members.len(), 1);
  assert_eq!(members[0].person, person);
  assert_eq!(members[0].role.as_deref(), Some("CEO"));

  assert!(s.remove_membership(membership.id).await.unwrap());
  assert!(!s.remove_membership(membership.id).await.unwrap());
  assert!(s.list_memberships(company.id).await.unwrap().is_empty());

  // The person outlives the link.
  assert!(s.get_person(person.id).await.unwrap().is_some());
}

#[tokio::test]
async fn add_membership_requires_both_sides() {
  let s = store().await;
  let company = s.create_company(new_company("Acme")).await.unwrap();
  let person = s.create_person(NewPerson::new("Alice")).await.unwrap();

  let err = s
    .add_membership(NewMembership {
      company_id: company.id + 100,
      person_id:  person.id,
      role:       None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(rolodex_core::Error::CompanyNotFound(_))));

  let err = s
    .add_membership(NewMembership {
      company_id: company.id,
      person_id:  person.id + 100,
      role:       None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(rolodex_core::Error::PersonNotFound(_))));
}

#[tokio::test]
async fn same_pair_can_be_linked_twice() {
  let s = store().await;
  let company = s.create_company(new_company("Acme")).await.unwrap();
  let person = s.create_person(NewPerson::new("Alice")).await.unwrap();

  let link = NewMembership { company_id: company.id, person_id: person.id, role: None };
  s.add_membership(link.clone()).await.unwrap();
  s.add_membership(link).await.unwrap();

  assert_eq!(s.list_memberships(company.id).await.unwrap().len(), 2);
}

// ─── Attach ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn attach_new_person_links_without_role() {
  let s = store().await;
  let company = s.create_company(new_company("Acme")).await.unwrap();

  let attached = s
    .attach_new_person(company.id, NewPerson::new("Alice"), None)
    .await
    .unwrap()
    .expect("company exists");
  assert_eq!(attached.person.name, "Alice");
  assert_eq!(attached.membership.company_id, company.id);
  assert_eq!(attached.membership.person_id, attached.person.id);
  assert_eq!(attached.membership.role, None);

  let (fetched, members) = s
    .get_company_with_people(company.id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched, company);
  assert_eq!(members.len(), 1);
  assert_eq!(members[0].person.name, "Alice");
  assert_eq!(members[0].role, None);
}

#[tokio::test]
async fn attach_same_name_twice_creates_two_people() {
  let s = store().await;
  let company = s.create_company(new_company("Acme")).await.unwrap();

  let first = s
    .attach_new_person(company.id, NewPerson::new("Alice"), None)
    .await
    .unwrap()
    .unwrap();
  let second = s
    .attach_new_person(company.id, NewPerson::new("Alice"), None)
    .await
    .unwrap()
    .unwrap();
  assert_ne!(first.person.id, second.person.id);

  let (_, members) = s
    .get_company_with_people(company.id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn attach_to_missing_company_writes_nothing() {
  let s = store().await;

  let result = s
    .attach_new_person(42, NewPerson::new("Alice"), None)
    .await
    .unwrap();
  assert!(result.is_none());

  // The rolled-back transaction left no orphan person behind: the next
  // person gets the first rowid.
  let person = s.create_person(NewPerson::new("Bob")).await.unwrap();
  assert_eq!(person.id, 1);
}

#[tokio::test]
async fn company_with_people_orders_by_link() {
  let s = store().await;
  let company = s.create_company(new_company("Acme")).await.unwrap();
  for name in ["Carol", "Alice", "Bob"] {
    s.attach_new_person(company.id, NewPerson::new(name), None)
      .await
      .unwrap();
  }

  let (_, members) = s
    .get_company_with_people(company.id)
    .await
    .unwrap()
    .unwrap();
  let names: Vec<_> = members.iter().map(|m| m.person.name.as_str()).collect();
  assert_eq!(names, ["Carol", "Alice", "Bob"]);
}

#[tokio::test]
async fn connect_memory_uri() {
  let s = SqliteStore::connect("sqlite::memory:").await.unwrap();
  assert!(s.list_companies().await.unwrap().is_empty());
}
