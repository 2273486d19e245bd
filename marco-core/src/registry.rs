//! Registry of tracked repositories
//!
//! Entries are unique on `(user, repo)` and kept in canonical `user/repo`
//! order. "Already exists" and "does not exist" are ordinary outcomes and
//! are reported as `false`, never as errors; no-op calls write nothing.

use std::sync::Arc;

use crate::repo::RepoEntry;
use crate::store::{ConfigPatch, ConfigStore};
use crate::Result;

/// CRUD access to the tracked repo list
#[derive(Clone)]
pub struct RepoRegistry {
    store: Arc<dyn ConfigStore>,
}

impl std::fmt::Debug for RepoRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoRegistry").finish_non_exhaustive()
    }
}

impl RepoRegistry {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// All tracked repos in stored order
    pub async fn list(&self) -> Result<Vec<RepoEntry>> {
        Ok(self.store.get().await?.repos)
    }

    /// Track a new repo; `false` if its identity is already tracked
    pub async fn add(&self, entry: RepoEntry) -> Result<bool> {
        let mut repos = self.list().await?;
        if repos.iter().any(|r| r.same_identity(&entry)) {
            return Ok(false);
        }

        tracing::info!(repo = %entry, base = %entry.base, "Adding repo");
        repos.push(entry);
        repos.sort_by(RepoEntry::canonical_cmp);
        self.persist(repos).await?;
        Ok(true)
    }

    /// Change the base branch of a tracked repo; `false` if it isn't tracked
    pub async fn update(&self, entry: &RepoEntry) -> Result<bool> {
        let mut repos = self.list().await?;
        let Some(target) = repos.iter_mut().find(|r| r.same_identity(entry)) else {
            return Ok(false);
        };

        tracing::info!(repo = %entry, from = %target.base, to = %entry.base, "Updating base branch");
        target.base = entry.base.clone();
        self.persist(repos).await?;
        Ok(true)
    }

    /// Stop tracking a repo; `false` if it isn't tracked
    pub async fn remove(&self, entry: &RepoEntry) -> Result<bool> {
        let mut repos = self.list().await?;
        let Some(index) = repos.iter().position(|r| r.same_identity(entry)) else {
            return Ok(false);
        };

        tracing::info!(repo = %entry, "Removing repo");
        repos.remove(index);
        self.persist(repos).await?;
        Ok(true)
    }

    /// Replace the whole list verbatim, without dedup or sorting
    pub async fn set_all(&self, entries: Vec<RepoEntry>) -> Result<()> {
        tracing::info!(count = entries.len(), "Replacing repo list");
        self.persist(entries).await
    }

    async fn persist(&self, repos: Vec<RepoEntry>) -> Result<()> {
        self.store.set(ConfigPatch::repos(repos)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Config;
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory store that counts writes
    #[derive(Default)]
    struct MemoryStore {
        pub config: Mutex<Config>,
        pub writes: Mutex<usize>,
        pub fail_writes: bool,
    }

    impl MemoryStore {
        pub fn with_repos(repos: Vec<RepoEntry>) -> Self {
            Self {
                config: Mutex::new(Config { repos }),
                ..Default::default()
            }
        }

        pub fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        pub fn repos(&self) -> Vec<RepoEntry> {
            self.config.lock().unwrap().repos.clone()
        }
    }

    #[async_trait]
    impl ConfigStore for MemoryStore {
        async fn get(&self) -> Result<Config> {
            Ok(self.config.lock().unwrap().clone())
        }

        async fn set(&self, patch: ConfigPatch) -> Result<()> {
            if self.fail_writes {
                return Err(Error::RegistryPersistFailed("disk full".to_string()));
            }
            self.config.lock().unwrap().merge(patch);
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn registry(store: &Arc<MemoryStore>) -> RepoRegistry {
        RepoRegistry::new(store.clone())
    }

    fn entry(user: &str, repo: &str, base: &str) -> RepoEntry {
        RepoEntry::new(user, repo, base)
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = Arc::new(MemoryStore::default());
        assert!(registry(&store).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_duplicate_identity() {
        let store = Arc::new(MemoryStore::default());
        let registry = registry(&store);

        assert!(registry.add(entry("user", "repo", "base")).await.unwrap());
        assert!(!registry.add(entry("user", "repo", "base")).await.unwrap());
        assert!(!registry.add(entry("user", "repo", "other")).await.unwrap());

        assert_eq!(registry.list().await.unwrap().len(), 1);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_add_keeps_canonical_order() {
        let store = Arc::new(MemoryStore::with_repos(vec![entry("user2", "repo2", "master")]));
        let registry = registry(&store);

        assert!(registry.add(entry("user1", "repo1", "master")).await.unwrap());

        let slugs: Vec<String> = store.repos().iter().map(RepoEntry::slug).collect();
        assert_eq!(slugs, vec!["user1/repo1", "user2/repo2"]);
    }

    #[tokio::test]
    async fn test_add_resorts_whole_set() {
        // Imported lists may be unsorted; the next add sorts everything
        let store = Arc::new(MemoryStore::with_repos(vec![
            entry("c", "c", "master"),
            entry("a", "a", "master"),
        ]));
        let registry = registry(&store);

        registry.add(entry("b", "b", "master")).await.unwrap();

        let slugs: Vec<String> = store.repos().iter().map(RepoEntry::slug).collect();
        assert_eq!(slugs, vec!["a/a", "b/b", "c/c"]);
    }

    #[tokio::test]
    async fn test_update_changes_only_base() {
        let store = Arc::new(MemoryStore::with_repos(vec![
            entry("a", "one", "master"),
            entry("b", "two", "master"),
        ]));
        let registry = registry(&store);

        assert!(registry.update(&entry("b", "two", "develop")).await.unwrap());

        assert_eq!(
            store.repos(),
            vec![entry("a", "one", "master"), entry("b", "two", "develop")]
        );
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_does_not_persist() {
        let store = Arc::new(MemoryStore::with_repos(vec![entry("a", "one", "master")]));
        let registry = registry(&store);

        assert!(!registry.update(&entry("a", "nope", "develop")).await.unwrap());

        assert_eq!(store.repos(), vec![entry("a", "one", "master")]);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_remove_preserves_others() {
        let store = Arc::new(MemoryStore::with_repos(vec![
            entry("a", "one", "master"),
            entry("b", "two", "main"),
            entry("c", "three", "develop"),
        ]));
        let registry = registry(&store);

        // Base is not part of the identity
        assert!(registry.remove(&entry("b", "two", "whatever")).await.unwrap());

        assert_eq!(
            store.repos(),
            vec![entry("a", "one", "master"), entry("c", "three", "develop")]
        );
    }

    #[tokio::test]
    async fn test_remove_missing() {
        let store = Arc::new(MemoryStore::with_repos(vec![entry("a", "one", "master")]));
        let registry = registry(&store);

        assert!(!registry.remove(&entry("A", "one", "master")).await.unwrap());
        assert_eq!(store.writes(), 0);
        assert_eq!(store.repos().len(), 1);
    }

    #[tokio::test]
    async fn test_set_all_is_verbatim() {
        let store = Arc::new(MemoryStore::default());
        let registry = registry(&store);
        let entries = vec![
            entry("z", "z", "master"),
            entry("a", "a", "master"),
            entry("z", "z", "main"),
        ];

        registry.set_all(entries.clone()).await.unwrap();

        assert_eq!(store.repos(), entries);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_persist_failure_propagates() {
        let store = Arc::new(MemoryStore {
            fail_writes: true,
            ..Default::default()
        });
        let registry = registry(&store);

        let result = registry.add(entry("u", "r", "master")).await;
        assert!(matches!(result, Err(Error::RegistryPersistFailed(_))));
    }
}
