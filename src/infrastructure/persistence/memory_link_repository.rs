//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local link store backed by a [`DashMap`].
///
/// Mirrors the PostgreSQL repository: codes are unique, lookups return
/// expired links as-is, and deletes are idempotent. Data is lost on restart.
#[derive(Debug)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored links, expired ones included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Default for InMemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_code_key" }),
            )),
            Entry::Vacant(slot) => {
                let link = Link::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    new_link.code,
                    new_link.url,
                    new_link.single_use,
                    new_link.expires_at,
                    Utc::now(),
                );
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut removed = 0;
        self.links.retain(|_, link| {
            let expired = link.is_expired_at(now);
            if expired {
                removed += 1;
            }
            !expired
        });
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_link(code: &str, expires_at: DateTime<Utc>) -> NewLink {
        NewLink {
            code: code.to_string(),
            url: format!("https://example.com/{code}"),
            single_use: false,
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryLinkRepository::new();
        let expires_at = Utc::now() + Duration::hours(1);

        let created = repo.create(new_link("abc", expires_at)).await.unwrap();
        assert_eq!(created.code, "abc");
        assert_eq!(created.expires_at, expires_at);

        let found = repo.find_by_code("abc").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_create_duplicate_code_conflicts() {
        let repo = InMemoryLinkRepository::new();
        let expires_at = Utc::now() + Duration::hours(1);

        repo.create(new_link("dup", expires_at)).await.unwrap();
        let result = repo.create(new_link("dup", expires_at)).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = InMemoryLinkRepository::new();
        let expires_at = Utc::now() + Duration::hours(1);

        let first = repo.create(new_link("a", expires_at)).await.unwrap();
        let second = repo.create(new_link("b", expires_at)).await.unwrap();

        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_find_returns_expired_links() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("old", Utc::now() - Duration::hours(1)))
            .await
            .unwrap();

        let found = repo.find_by_code("old").await.unwrap();
        assert!(found.is_some_and(|l| l.is_expired()));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("gone", Utc::now() + Duration::hours(1)))
            .await
            .unwrap();

        assert!(repo.delete("gone").await.unwrap());
        assert!(!repo.delete("gone").await.unwrap());
        assert!(repo.find_by_code("gone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_expired_removes_only_expired() {
        let repo = InMemoryLinkRepository::new();
        let now = Utc::now();

        repo.create(new_link("past1", now - Duration::hours(2)))
            .await
            .unwrap();
        repo.create(new_link("past2", now - Duration::seconds(1)))
            .await
            .unwrap();
        repo.create(new_link("boundary", now)).await.unwrap();
        repo.create(new_link("future", now + Duration::hours(1)))
            .await
            .unwrap();

        let removed = repo.delete_expired(now).await.unwrap();

        assert_eq!(removed, 3);
        assert_eq!(repo.len(), 1);
        assert!(repo.find_by_code("future").await.unwrap().is_some());
    }
}
