//! In-memory implementation of the short link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::RepositoryError;

/// Process-local repository backed by a `DashMap`.
///
/// Inserts go through the map's entry API, which holds the shard lock while
/// checking and writing, so insert-if-absent is atomic. Contents are lost on
/// restart.
#[derive(Debug)]
pub struct InMemoryShortLinkRepository {
    links: DashMap<String, ShortLink>,
    next_id: AtomicI64,
}

impl InMemoryShortLinkRepository {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryShortLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, RepositoryError> {
        match self.links.entry(new_link.key) {
            Entry::Occupied(entry) => Err(RepositoryError::Conflict {
                key: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let link = ShortLink::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    entry.key().clone(),
                    new_link.long_url,
                    Some(Utc::now()),
                );
                entry.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ShortLink>, RepositoryError> {
        Ok(self.links.get(key).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, RepositoryError> {
        Ok(self.links.remove(key).is_some())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.links.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(key: &str, url: &str) -> NewShortLink {
        NewShortLink {
            key: key.to_string(),
            long_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryShortLinkRepository::new();

        let link = repo
            .insert(new_link("cd69b8", "https://example.com/a"))
            .await
            .unwrap();
        assert_eq!(link.id, 1);

        let found = repo.find_by_key("cd69b8").await.unwrap().unwrap();
        assert_eq!(found, link);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = InMemoryShortLinkRepository::new();
        assert!(repo.find_by_key("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_conflict_keeps_original() {
        let repo = InMemoryShortLinkRepository::new();

        repo.insert(new_link("cd69b8", "https://example.com/a"))
            .await
            .unwrap();

        let err = repo
            .insert(new_link("cd69b8", "https://other.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { key } if key == "cd69b8"));

        let found = repo.find_by_key("cd69b8").await.unwrap().unwrap();
        assert_eq!(found.long_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryShortLinkRepository::new();

        repo.insert(new_link("cd69b8", "https://example.com/a"))
            .await
            .unwrap();

        assert!(repo.delete("cd69b8").await.unwrap());
        assert!(!repo.delete("cd69b8").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_of_same_key() {
        let repo = Arc::new(InMemoryShortLinkRepository::new());
        let mut handles = vec![];

        for i in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(new_link("aaaaaa", &format!("https://example{i}.com")))
                    .await
                    .is_ok()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
