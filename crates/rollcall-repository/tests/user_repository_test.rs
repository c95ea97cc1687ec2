//! Integration tests for PostgresUserRepository.
//!
//! These tests run against a real Postgres database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use rollcall_core::{Email, ProfileId, RollcallError, User, UserId};
use rollcall_repository::{
    seed_default_profiles, PostgresProfileRepository, PostgresUserRepository, ProfileRepository,
    UserRepository,
};

struct Fixture {
    _db: TestDatabase,
    users: PostgresUserRepository,
    admin: ProfileId,
    member: ProfileId,
}

async fn fixture() -> Fixture {
    let db = TestDatabase::new().await;
    seed_default_profiles(db.pool().as_ref())
        .await
        .expect("Seed failed");

    let profiles = PostgresProfileRepository::new(db.pool())
        .find_all()
        .await
        .expect("Query failed");

    Fixture {
        users: PostgresUserRepository::new(db.pool()),
        admin: profiles[0].id,
        member: profiles[1].id,
        _db: db,
    }
}

fn create_test_user(email: &str, profile_id: ProfileId) -> User {
    User::builder()
        .first_name("Test")
        .last_name("User")
        .email(Email::new_unchecked(email))
        .profile_id(profile_id)
        .build()
        .expect("Failed to build user")
}

#[tokio::test]
async fn test_save_and_find_by_id() {
    let f = fixture().await;
    let user = create_test_user("test@example.com", f.member);

    let saved = f.users.save(&user).await.expect("Failed to save user");
    assert_eq!(saved.email.as_str(), "test@example.com");
    assert!(saved.is_active);

    let found = f
        .users
        .find_by_id(user.id)
        .await
        .expect("Failed to find user")
        .expect("User not found");

    assert_eq!(found.id, user.id);
    assert_eq!(found.first_name, "Test");
    assert_eq!(found.profile_id, Some(f.member));
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let f = fixture().await;
    let result = f.users.find_by_id(UserId::new()).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_by_email_case_insensitive() {
    let f = fixture().await;
    f.users
        .save(&create_test_user("CaseSensitive@Example.COM", f.member))
        .await
        .expect("Failed to save user");

    let found = f
        .users
        .find_by_email("casesensitive@example.com")
        .await
        .expect("Query failed");
    assert!(found.is_some());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let f = fixture().await;
    f.users
        .save(&create_test_user("dup@example.com", f.member))
        .await
        .expect("Failed to save user");

    let result = f
        .users
        .save(&create_test_user("dup@example.com", f.admin))
        .await;
    assert!(matches!(result, Err(RollcallError::Conflict(_))));
}

#[tokio::test]
async fn test_unknown_profile_is_validation_error() {
    let f = fixture().await;
    let result = f
        .users
        .save(&create_test_user("orphan@example.com", ProfileId::new()))
        .await;
    assert!(matches!(result, Err(RollcallError::Validation(_))));
}

#[tokio::test]
async fn test_find_all_newest_first_and_filtered() {
    let f = fixture().await;

    let mut older = create_test_user("older@example.com", f.admin);
    older.created_at -= chrono::Duration::minutes(5);
    let newer = create_test_user("newer@example.com", f.member);

    f.users.save(&older).await.expect("Failed to save user");
    f.users.save(&newer).await.expect("Failed to save user");

    let all = f.users.find_all(None).await.expect("Query failed");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, newer.id);
    assert_eq!(all[1].id, older.id);

    let admins = f.users.find_all(Some(f.admin)).await.expect("Query failed");
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].id, older.id);
}

#[tokio::test]
async fn test_update_and_deactivate() {
    let f = fixture().await;
    let mut user = create_test_user("update@example.com", f.member);
    f.users.save(&user).await.expect("Failed to save user");

    user.first_name = "Renamed".to_string();
    user.deactivate();

    let updated = f
        .users
        .update(&user)
        .await
        .expect("Failed to update user")
        .expect("User not found");
    assert_eq!(updated.first_name, "Renamed");
    assert!(!updated.is_active);

    let ghost = create_test_user("ghost@example.com", f.member);
    let missing = f.users.update(&ghost).await.expect("Query failed");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_delete() {
    let f = fixture().await;
    let user = create_test_user("delete@example.com", f.member);
    f.users.save(&user).await.expect("Failed to save user");

    assert!(f.users.delete(user.id).await.expect("Delete failed"));
    assert!(!f.users.delete(user.id).await.expect("Delete failed"));
    assert!(f
        .users
        .find_by_id(user.id)
        .await
        .expect("Query failed")
        .is_none());
}
