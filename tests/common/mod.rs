#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use chrono::{DateTime, Utc};
use ephemeral_links::domain::repositories::LinkRepository;
use ephemeral_links::infrastructure::persistence::InMemoryLinkRepository;
use ephemeral_links::routes::app_router;
use ephemeral_links::state::AppState;
use tower_http::normalize_path::NormalizePath;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(repo.clone());

    (state, repo)
}

/// Full application, middleware included, over an in-memory store.
pub fn create_test_app() -> (
    IntoMakeService<NormalizePath<axum::Router>>,
    Arc<InMemoryLinkRepository>,
) {
    let (state, repo) = create_test_state();
    let app = ServiceExt::<Request>::into_make_service(app_router(state));

    (app, repo)
}

/// Waits for a spawned best-effort delete to land.
pub async fn wait_until_deleted(repo: &InMemoryLinkRepository, code: &str) -> bool {
    for _ in 0..100 {
        if repo.find_by_code(code).await.unwrap().is_none() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    false
}

pub async fn insert_link(
    pool: &PgPool,
    code: &str,
    url: &str,
    single_use: bool,
    expires_at: DateTime<Utc>,
) {
    sqlx::query("INSERT INTO links (code, url, single_use, expires_at) VALUES ($1, $2, $3, $4)")
        .bind(code)
        .bind(url)
        .bind(single_use)
        .bind(expires_at)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}
