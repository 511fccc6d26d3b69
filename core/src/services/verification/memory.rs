//! In-memory implementation of CodeStore.
//!
//! Backs the test suite and the dev profile. Entries carry an expiry instant
//! and are dropped lazily on read.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::errors::DomainResult;

use super::traits::CodeStore;

/// In-memory verification-code store with per-entry expiry
pub struct MemoryCodeStore {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
}

impl MemoryCodeStore {
    /// Create a store whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn set(&self, identifier: &str, code: &str) -> DomainResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            identifier.to_string(),
            (code.to_string(), Instant::now() + self.ttl),
        );
        Ok(())
    }

    async fn get(&self, identifier: &str) -> DomainResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(identifier) {
                Some((code, expires_at)) if *expires_at > Instant::now() => {
                    return Ok(Some(code.clone()))
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }
        // Entry exists but has expired; drop it.
        self.entries.write().await.remove(identifier);
        Ok(None)
    }

    async fn remove(&self, identifier: &str) -> DomainResult<()> {
        self.entries.write().await.remove(identifier);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryCodeStore::new(Duration::from_secs(300));
        store.set("13800000000", "482913").await.unwrap();

        assert_eq!(
            store.get("13800000000").await.unwrap().as_deref(),
            Some("482913")
        );
    }

    #[tokio::test]
    async fn test_get_unset_key() {
        let store = MemoryCodeStore::new(Duration::from_secs(300));
        assert!(store.get("13800000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_code() {
        let store = MemoryCodeStore::new(Duration::from_secs(300));
        store.set("13800000000", "111111").await.unwrap();
        store.set("13800000000", "222222").await.unwrap();

        assert_eq!(
            store.get("13800000000").await.unwrap().as_deref(),
            Some("222222")
        );
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let store = MemoryCodeStore::new(Duration::from_millis(20));
        store.set("13800000000", "482913").await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(store.get("13800000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_drops_the_entry() {
        let store = MemoryCodeStore::new(Duration::from_secs(300));
        store.set("13800000000", "482913").await.unwrap();
        store.remove("13800000000").await.unwrap();

        assert!(store.get("13800000000").await.unwrap().is_none());
    }
}
