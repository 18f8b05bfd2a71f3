//! PostgreSQL repository tests.
//!
//! Require a reachable database in `DATABASE_URL`; run with
//! `cargo test --test repository_link -- --ignored`.

mod common;

use chrono::{Duration, Utc};
use ephemeral_links::domain::entities::NewLink;
use ephemeral_links::domain::repositories::LinkRepository;
use ephemeral_links::error::AppError;
use ephemeral_links::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        url: "https://example.com".to_string(),
        single_use: true,
        expires_at: Utc::now() + Duration::hours(1),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.create(new_link("test123")).await.unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.url, "https://example.com");
    assert!(link.single_use);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_duplicate_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup")).await.unwrap();
    let result = repo.create(new_link("dup")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_code(pool: PgPool) {
    let expires_at = Utc::now() + Duration::hours(1);
    common::insert_link(&pool, "abc123", "https://example.com", false, expires_at).await;

    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.find_by_code("abc123").await.unwrap().unwrap();

    assert_eq!(link.code, "abc123");
    assert!(!link.single_use);
    assert_eq!(link.expires_at.timestamp(), expires_at.timestamp());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_is_idempotent(pool: PgPool) {
    common::insert_link(
        &pool,
        "gone",
        "https://example.com",
        false,
        Utc::now() + Duration::hours(1),
    )
    .await;

    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.delete("gone").await.unwrap());
    assert!(!repo.delete("gone").await.unwrap());
    assert!(repo.find_by_code("gone").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_expired(pool: PgPool) {
    let now = Utc::now();
    common::insert_link(&pool, "old1", "https://a.com", false, now - Duration::days(1)).await;
    common::insert_link(&pool, "old2", "https://b.com", true, now - Duration::seconds(1)).await;
    common::insert_link(&pool, "live", "https://c.com", false, now + Duration::days(1)).await;

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    let removed = repo.delete_expired(now).await.unwrap();

    assert_eq!(removed, 2);
    assert_eq!(common::count_links(&pool).await, 1);
    assert!(repo.find_by_code("live").await.unwrap().is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
