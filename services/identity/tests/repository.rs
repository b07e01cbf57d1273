//! Integration tests for the identity repository
//!
//! These tests run the full repository stack over the in-memory store,
//! which enforces the same uniqueness constraint as the PostgreSQL
//! schema.

use std::sync::Arc;

use identity::bootstrap::{DEFAULT_ADMIN_USERNAME, ensure_default_admin};
use identity::{IdentityError, MemoryUserStore, Role, UpdateUser, UserRepository};

fn repository() -> UserRepository {
    UserRepository::new(Arc::new(MemoryUserStore::new()))
}

#[tokio::test]
async fn test_create_then_lookup() {
    let repo = repository();

    let created = repo
        .create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();

    let found = repo.get_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.email, "a@x.com");
    assert_eq!(found.role, Role::User);

    // The digest is never the plaintext, but verifies against it
    assert_ne!(found.password_hash, "pw1");
    assert!(found.verify_password("pw1"));
    assert!(!found.verify_password("pw2"));

    let by_id = repo.get_by_id(&created.id.to_string()).await.unwrap();
    assert!(by_id.is_some());
    let by_email = repo.get_by_email("a@x.com").await.unwrap();
    assert!(by_email.is_some());
}

#[tokio::test]
async fn test_create_rejects_duplicates_username_first() {
    let repo = repository();
    repo.create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();

    let same_username = repo.create("alice", "other@x.com", "pw2", Role::User).await;
    assert!(matches!(same_username, Err(IdentityError::DuplicateUsername)));

    let same_email = repo.create("bob", "a@x.com", "pw2", Role::User).await;
    assert!(matches!(same_email, Err(IdentityError::DuplicateEmail)));

    // When both collide the username collision is reported
    let both = repo.create("alice", "a@x.com", "pw2", Role::User).await;
    assert!(matches!(both, Err(IdentityError::DuplicateUsername)));
}

#[tokio::test]
async fn test_create_validates_before_uniqueness() {
    let repo = repository();
    repo.create("alice", "e@x.com", "pw", Role::User)
        .await
        .unwrap();

    // An empty username is a validation failure, not a duplicate report
    let empty = repo.create("", "e@x.com", "pw", Role::User).await;
    assert!(matches!(empty, Err(IdentityError::Validation(_))));

    let bad_email = repo.create("bob", "not-an-email", "pw", Role::User).await;
    assert!(matches!(bad_email, Err(IdentityError::Validation(_))));
}

#[tokio::test]
async fn test_concurrent_create_same_username_single_winner() {
    let repo = repository();

    let first = {
        let repo = repo.clone();
        tokio::spawn(async move { repo.create("alice", "a@x.com", "pw1", Role::User).await })
    };
    let second = {
        let repo = repo.clone();
        tokio::spawn(async move { repo.create("alice", "a@x.com", "pw2", Role::User).await })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(IdentityError::DuplicateUsername)))
    );
    assert_eq!(repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_by_id_malformed_is_absent() {
    let repo = repository();
    assert!(repo.get_by_id("not-a-uuid").await.unwrap().is_none());
    assert!(repo.get_by_id("").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_returns_every_account() {
    let repo = repository();
    repo.create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();
    repo.create("bob", "b@x.com", "pw2", Role::Admin)
        .await
        .unwrap();

    let mut usernames: Vec<String> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    usernames.sort();
    assert_eq!(usernames, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_update_role_leaves_other_fields_unchanged() {
    let repo = repository();
    let created = repo
        .create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();
    let id = created.id.to_string();

    let changed = repo
        .update(
            &id,
            &UpdateUser {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(changed);

    let after = repo.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(after.role, Role::Admin);
    assert!(after.is_admin());
    assert_eq!(after.username, created.username);
    assert_eq!(after.email, created.email);
    assert_eq!(after.password_hash, created.password_hash);
    assert_eq!(after.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_password_is_rehashed() {
    let repo = repository();
    let created = repo
        .create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();
    let id = created.id.to_string();

    let changed = repo
        .update(
            &id,
            &UpdateUser {
                password: Some("pw2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(changed);

    let after = repo.get_by_id(&id).await.unwrap().unwrap();
    assert_ne!(after.password_hash, "pw2");
    assert!(after.verify_password("pw2"));
    assert!(!after.verify_password("pw1"));
}

#[tokio::test]
async fn test_update_missing_or_malformed_id_returns_false() {
    let repo = repository();
    let update = UpdateUser {
        role: Some(Role::Admin),
        ..Default::default()
    };

    let unknown = uuid::Uuid::new_v4().to_string();
    assert!(!repo.update(&unknown, &update).await.unwrap());
    assert!(!repo.update("not-a-uuid", &update).await.unwrap());
}

#[tokio::test]
async fn test_update_with_no_fields_returns_false() {
    let repo = repository();
    let created = repo
        .create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();

    let changed = repo
        .update(&created.id.to_string(), &UpdateUser::default())
        .await
        .unwrap();
    assert!(!changed);
}

#[tokio::test]
async fn test_update_email_collision_is_rejected_by_store() {
    let repo = repository();
    repo.create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();
    let bob = repo
        .create("bob", "b@x.com", "pw2", Role::User)
        .await
        .unwrap();

    let result = repo
        .update(
            &bob.id.to_string(),
            &UpdateUser {
                email: Some("a@x.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(IdentityError::DuplicateEmail)));
}

#[tokio::test]
async fn test_delete_then_lookup_is_absent() {
    let repo = repository();
    let created = repo
        .create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();
    let id = created.id.to_string();

    assert!(repo.delete(&id).await.unwrap());
    assert!(repo.get_by_id(&id).await.unwrap().is_none());

    // A second delete and a malformed id both report nothing removed
    assert!(!repo.delete(&id).await.unwrap());
    assert!(!repo.delete("not-a-uuid").await.unwrap());
}

#[tokio::test]
async fn test_exists_tracks_account_count() {
    let repo = repository();
    assert!(!repo.exists().await.unwrap());

    let created = repo
        .create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();
    assert!(repo.exists().await.unwrap());

    repo.delete(&created.id.to_string()).await.unwrap();
    assert!(!repo.exists().await.unwrap());
}

#[tokio::test]
async fn test_ensure_default_admin_runs_once() {
    let repo = repository();

    assert!(ensure_default_admin(&repo).await);

    let admin = repo
        .get_by_username(DEFAULT_ADMIN_USERNAME)
        .await
        .unwrap()
        .unwrap();
    assert!(admin.is_admin());
    assert!(admin.verify_password("admin123"));

    // A second run observes the existing account and creates nothing
    assert!(!ensure_default_admin(&repo).await);
    assert_eq!(repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_ensure_default_admin_skips_populated_store() {
    let repo = repository();
    repo.create("alice", "a@x.com", "pw1", Role::User)
        .await
        .unwrap();

    assert!(!ensure_default_admin(&repo).await);
    assert!(
        repo.get_by_username(DEFAULT_ADMIN_USERNAME)
            .await
            .unwrap()
            .is_none()
    );
}
