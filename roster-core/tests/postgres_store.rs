use chrono::Utc;
use sqlx::PgPool;

use roster_core::{Account, AccountStore, NewAccount, PostgresAccountStore, RosterError};

fn new_account(username: &str, email: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: email.to_string(),
        credential: "$argon2id$stub".to_string(),
    }
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn insert_returns_the_persisted_row(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);

    let ada = store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();

    assert_eq!(ada.username, "ada");
    assert_eq!(ada.email, "ada@example.com");
    assert_eq!(ada.credential, "$argon2id$stub");

    let fetched = store.find_by_id(ada.id).await.unwrap().unwrap();
    assert_eq!(fetched, ada);
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn insert_rejects_duplicate_username(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);
    store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();

    let err = store
        .insert(new_account("ada", "other@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, RosterError::UsernameTaken));
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn insert_rejects_duplicate_email(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);
    store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();

    let err = store
        .insert(new_account("grace", "ada@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, RosterError::EmailTaken));
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn update_persists_the_merged_fields(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);
    let mut ada = store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();

    ada.username = "countess".to_string();
    ada.email = "ada@lovelace.org".to_string();
    ada.credential = "$argon2id$rotated".to_string();
    ada.updated_at = Utc::now();
    store.update(&ada).await.unwrap();

    let stored = store.find_by_id(ada.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "countess");
    assert_eq!(stored.email, "ada@lovelace.org");
    assert_eq!(stored.credential, "$argon2id$rotated");
    assert_eq!(stored.created_at, ada.created_at);
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn update_rejects_collision_with_other_record(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);
    store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();
    let mut grace = store
        .insert(new_account("grace", "grace@example.com"))
        .await
        .unwrap();

    grace.username = "ada".to_string();
    let err = store.update(&grace).await.unwrap_err();

    assert!(matches!(err, RosterError::UsernameTaken));
    let stored = store.find_by_id(grace.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "grace");
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn update_keeping_own_fields_is_not_a_collision(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);
    let mut ada = store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();

    ada.credential = "$argon2id$rotated".to_string();
    ada.updated_at = Utc::now();
    store.update(&ada).await.unwrap();

    let stored = store.find_by_id(ada.id).await.unwrap().unwrap();
    assert_eq!(stored.credential, "$argon2id$rotated");
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn update_of_unknown_id_is_not_found(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);
    let ghost = Account {
        id: 99,
        username: "ghost".to_string(),
        email: "ghost@example.com".to_string(),
        credential: "$argon2id$stub".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let err = store.update(&ghost).await.unwrap_err();

    assert!(matches!(err, RosterError::NotFound(99)));
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn delete_reports_rows_removed(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);
    let ada = store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();

    assert_eq!(store.delete_by_id(ada.id).await.unwrap(), 1);
    assert_eq!(store.delete_by_id(ada.id).await.unwrap(), 0);
    assert!(store.find_by_id(ada.id).await.unwrap().is_none());
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn find_all_is_id_ordered(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);
    let ada = store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();
    let grace = store
        .insert(new_account("grace", "grace@example.com"))
        .await
        .unwrap();
    let edsger = store
        .insert(new_account("edsger", "edsger@example.com"))
        .await
        .unwrap();

    assert!(ada.id < grace.id && grace.id < edsger.id);

    let ids: Vec<_> = store
        .find_all()
        .await
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(ids, vec![ada.id, grace.id, edsger.id]);
}

#[sqlx::test(migrator = "roster_core::MIGRATOR")]
async fn existence_checks_follow_the_rows(pool: PgPool) {
    let store = PostgresAccountStore::new(pool);

    assert!(!store.username_exists("ada").await.unwrap());
    assert!(!store.email_exists("ada@example.com").await.unwrap());

    store
        .insert(new_account("ada", "ada@example.com"))
        .await
        .unwrap();

    assert!(store.username_exists("ada").await.unwrap());
    assert!(store.email_exists("ada@example.com").await.unwrap());
    assert!(!store.username_exists("grace").await.unwrap());
}
