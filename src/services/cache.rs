//! In-process TTL cache for query results.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// Maps a key to a value fetched at most `ttl` ago.
///
/// Expiry is checked on read; entries are never invalidated by data changes.
/// Concurrent misses on the same key may each fetch, and the last insert
/// wins. Failed fetches are not stored.
#[derive(Clone)]
pub struct ResultCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
    name: &'static str,
}

impl<K, V> ResultCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            name,
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;

        // Drop anything already stale while we hold the write lock
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);

        entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Returns the fresh cached value for `key`, or runs `fetch` and caches
    /// its result if it succeeds.
    pub async fn get_or_try_fetch<F, Fut, E>(&self, key: &K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            metrics::counter!("facility_cache_hits_total", "cache" => self.name).increment(1);
            tracing::debug!(cache = self.name, "Cache hit");
            return Ok(value);
        }

        metrics::counter!("facility_cache_misses_total", "cache" => self.name).increment(1);
        tracing::debug!(cache = self.name, "Cache miss, fetching");

        let value = fetch().await?;
        self.insert(key.clone(), value.clone()).await;
        Ok(value)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
