//! Time-boxed in-memory cache for fetch and transformation results.
//!
//! Entries expire after a fixed TTL and are then treated as misses without
//! being eagerly evicted; eviction happens on insert when the cache is at
//! capacity, keeping the most-recently-written entries. Keys are prefixed
//! `owner/repo:` so a repository's entries can be invalidated together.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

/// Snapshot of cache contents and traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Entries currently stored, expired or not
    pub total: usize,
    /// Stored entries still within their TTL
    pub valid: usize,
    /// Stored entries past their TTL but not yet evicted
    pub expired: usize,
    /// Lifetime lookup hits
    pub hits: u64,
    /// Lifetime lookup misses (including expired entries)
    pub misses: u64,
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    cached_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

/// TTL cache with bounded capacity and prefix invalidation.
///
/// Reads and writes are atomic per key; independent fetch flows may share
/// one instance. Last write wins on overwriting an existing key.
pub struct TtlCache<V: Clone> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    ttl: Duration,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache with a fixed TTL and entry capacity.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a key. Expired entries count as misses.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a value, evicting expired then oldest-written entries when the
    /// cache is at capacity.
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let mut entries = self.entries.write().await;

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            entries.retain(|_, entry| !entry.is_expired(self.ttl));
        }

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let to_evict = entries.len() + 1 - self.max_entries;
            evict_oldest(&mut entries, to_evict);
            debug!(evicted = to_evict, "cache at capacity, dropped oldest entries");
        }

        entries.insert(
            key,
            Entry {
                value,
                cached_at: Instant::now(),
            },
        );
    }

    /// Remove every entry whose key starts with `prefix`. Returns the
    /// number removed.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(prefix, removed, "cache entries invalidated");
        }
        removed
    }

    /// Remove every entry. Returns the number removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Current contents and traffic counters.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let total = entries.len();
        let expired = entries
            .values()
            .filter(|entry| entry.is_expired(self.ttl))
            .count();

        CacheStats {
            total,
            valid: total - expired,
            expired,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn evict_oldest<V>(entries: &mut HashMap<String, Entry<V>>, count: usize) {
    if count == 0 {
        return;
    }

    let mut by_age: Vec<(String, Instant)> = entries
        .iter()
        .map(|(key, entry)| (key.clone(), entry.cached_at))
        .collect();
    by_age.sort_by_key(|(_, cached_at)| *cached_at);

    for (key, _) in by_age.into_iter().take(count) {
        entries.remove(&key);
    }
}
