//! Runs against the database in `TEST_DATABASE_URL`. Each test works on its
//! own connection inside a transaction that is never committed. Ignored by
//! default; run with `cargo test -- --ignored` once the variable is set.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, TimeZone, Utc};
use diesel::{Connection, PgConnection, connection::SimpleConnection};
use subscription_core::{
    domain::{
        entities::subscriptions::InsertSubscriptionEntity,
        repositories::subscriptions::SubscriptionRepository,
        value_objects::enums::{providers::Provider, subscription_statuses::SubscriptionStatus},
    },
    infra::db::{
        postgres::postgres_connection, repositories::subscriptions::SubscriptionPostgres,
    },
};

const CREATE_SUBSCRIPTIONS: &str =
    include_str!("../migrations/2024-05-10-000000_create_subscriptions/up.sql");

static SCHEMA_READY: OnceLock<()> = OnceLock::new();

fn test_repository() -> SubscriptionPostgres {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must point at a Postgres database");

    SCHEMA_READY.get_or_init(|| {
        let mut conn = PgConnection::establish(&database_url).expect("connect to test database");
        conn.batch_execute(CREATE_SUBSCRIPTIONS)
            .expect("create subscriptions table");
    });

    let pool = postgres_connection::establish_test_connection(&database_url)
        .expect("build test pool");
    pool.get()
        .expect("test connection")
        .batch_execute("DELETE FROM subscriptions")
        .expect("clear subscriptions");

    SubscriptionPostgres::new(Arc::new(pool))
}

fn instant(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 6, 1, 8, 30, 0).unwrap()
}

fn entity(
    user_id: i32,
    name: &str,
    provider: Provider,
    status: SubscriptionStatus,
) -> InsertSubscriptionEntity {
    InsertSubscriptionEntity {
        user_id,
        name: name.to_string(),
        provider: provider.to_string(),
        expiration_date: instant(2030),
        status: status.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn insert_then_find_by_id_returns_the_stored_row() {
    let repository = test_repository();

    let inserted = repository
        .insert(entity(1, "Ivan", Provider::Google, SubscriptionStatus::Active))
        .await
        .unwrap();

    assert_eq!(inserted.user_id, 1);
    assert_eq!(inserted.name, "Ivan");
    assert_eq!(inserted.provider, "GOOGLE");
    assert_eq!(inserted.expiration_date, instant(2030));
    assert_eq!(inserted.status, "ACTIVE");

    let found = repository.find_by_id(inserted.id).await.unwrap();
    assert_eq!(found, Some(inserted));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn find_by_id_of_unknown_row_is_none() {
    let repository = test_repository();

    let inserted = repository
        .insert(entity(1, "Ivan", Provider::Google, SubscriptionStatus::Active))
        .await
        .unwrap();

    let found = repository.find_by_id(inserted.id + 1).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn find_all_returns_every_row() {
    let repository = test_repository();

    for (user_id, name, provider, status) in [
        (1, "Ivan", Provider::Google, SubscriptionStatus::Active),
        (2, "Danil", Provider::Apple, SubscriptionStatus::Expired),
        (3, "Alex", Provider::Google, SubscriptionStatus::Canceled),
    ] {
        repository
            .insert(entity(user_id, name, provider, status))
            .await
            .unwrap();
    }

    let all = repository.find_all().await.unwrap();

    let user_ids: Vec<i32> = all.iter().map(|row| row.user_id).collect();
    assert_eq!(user_ids, vec![1, 2, 3]);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn find_by_user_id_filters_rows() {
    let repository = test_repository();

    let inserted = repository
        .insert(entity(1, "Ivan", Provider::Google, SubscriptionStatus::Active))
        .await
        .unwrap();
    repository
        .insert(entity(2, "Danil", Provider::Apple, SubscriptionStatus::Active))
        .await
        .unwrap();

    assert_eq!(repository.find_by_user_id(1).await.unwrap(), vec![inserted]);
    assert!(repository.find_by_user_id(42).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn update_overwrites_the_row_in_place() {
    let repository = test_repository();

    let inserted = repository
        .insert(entity(1, "Ivan", Provider::Google, SubscriptionStatus::Active))
        .await
        .unwrap();

    let mut replacement = entity(2, "Danil", Provider::Apple, SubscriptionStatus::Expired);
    replacement.expiration_date = instant(2031);
    let updated = repository
        .update(inserted.id, replacement)
        .await
        .unwrap();

    assert_eq!(updated.id, inserted.id);
    assert_eq!(updated.user_id, 2);
    assert_eq!(updated.name, "Danil");
    assert_eq!(updated.provider, "APPLE");
    assert_eq!(updated.expiration_date, instant(2031));
    assert_eq!(updated.status, "EXPIRED");
    assert_eq!(repository.find_by_id(inserted.id).await.unwrap(), Some(updated));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn update_of_unknown_row_fails() {
    let repository = test_repository();

    let result = repository
        .update(
            1_000_000,
            entity(1, "Ivan", Provider::Google, SubscriptionStatus::Active),
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn upsert_inserts_without_id_and_updates_with_one() {
    let repository = test_repository();

    let inserted = repository
        .upsert(
            None,
            entity(1, "Ivan", Provider::Google, SubscriptionStatus::Active),
        )
        .await
        .unwrap();
    let updated = repository
        .upsert(
            Some(inserted.id),
            entity(1, "Ivan", Provider::Apple, SubscriptionStatus::Active),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, inserted.id);
    assert_eq!(updated.provider, "APPLE");
    assert_eq!(repository.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn delete_succeeds_once_per_existing_row() {
    let repository = test_repository();

    let inserted = repository
        .insert(entity(1, "Ivan", Provider::Google, SubscriptionStatus::Active))
        .await
        .unwrap();

    assert!(!repository.delete(inserted.id + 1).await.unwrap());
    assert!(repository.delete(inserted.id).await.unwrap());
    assert!(!repository.delete(inserted.id).await.unwrap());
    assert!(repository.find_by_id(inserted.id).await.unwrap().is_none());
}
