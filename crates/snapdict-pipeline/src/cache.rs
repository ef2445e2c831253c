//! Bounded, shard-locked memoization shared by every pipeline caller.
//!
//! Each shard is an LRU behind its own mutex; a key's shard is picked by a
//! seeded xxHash so unrelated lookups rarely contend. Values are cloned out
//! and the lock is never held while a value is being computed, so two
//! callers racing on the same key may both compute it. Both get the same
//! answer because every cached computation is a pure function of its key.

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use snapdict_core::config::CacheSettings;
use snapdict_core::types::{EnrichmentRecord, PipelineResult};
use twox_hash::XxHash64;

/// Hit, miss and size counters for one cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct ShardedLru<K, V> {
    shards: Vec<Mutex<LruCache<K, V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> ShardedLru<K, V> {
    /// `capacity` is split evenly across `shards`; each shard keeps at least one entry.
    pub fn new(capacity: usize, shards: usize) -> Self {
        let shards = shards.max(1);
        let per_shard = NonZeroUsize::new(capacity.div_ceil(shards)).unwrap_or(NonZeroUsize::MIN);
        Self {
            shards: (0..shards).map(|_| Mutex::new(LruCache::new(per_shard))).collect(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn shard<Q: Hash + ?Sized>(&self, key: &Q) -> &Mutex<LruCache<K, V>> {
        let mut hasher = XxHash64::with_seed(0);
        key.hash(&mut hasher);
        let idx = (hasher.finish() % self.shards.len() as u64) as usize;
        &self.shards[idx]
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.shard(key).lock().get(key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn insert(&self, key: K, value: V) {
        self.shard(&key).lock().put(key, value);
    }

    /// Returns the cached value or computes, stores and returns a fresh one.
    pub fn get_or_insert_with<Q>(&self, key: &Q, compute: impl FnOnce() -> V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = compute();
        self.insert(key.to_owned(), value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shards.iter().map(|s| s.lock().cap().get()).sum()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

/// Content hash identifying a request, hex-encoded blake3.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    pub fn of_text(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultCacheStats {
    pub verdicts: CacheStats,
    pub records: CacheStats,
    pub documents: CacheStats,
}

/// Per-lemma verdicts and records plus whole-request results.
///
/// A `None` record means the knowledge base has nothing for that lemma; it is
/// cached like any other answer.
pub struct ResultCache {
    verdicts: ShardedLru<String, bool>,
    records: ShardedLru<String, Option<EnrichmentRecord>>,
    documents: ShardedLru<Fingerprint, Arc<PipelineResult>>,
}

impl ResultCache {
    pub fn new(settings: &CacheSettings) -> Self {
        Self {
            verdicts: ShardedLru::new(settings.lemma_capacity, settings.shards),
            records: ShardedLru::new(settings.lemma_capacity, settings.shards),
            documents: ShardedLru::new(settings.document_capacity, settings.shards),
        }
    }

    pub fn verdict(&self, lemma: &str, compute: impl FnOnce() -> bool) -> bool {
        self.verdicts.get_or_insert_with(lemma, compute)
    }

    pub fn record(&self, lemma: &str, compute: impl FnOnce() -> Option<EnrichmentRecord>) -> Option<EnrichmentRecord> {
        self.records.get_or_insert_with(lemma, compute)
    }

    pub fn document(&self, key: &Fingerprint) -> Option<Arc<PipelineResult>> {
        self.documents.get(key)
    }

    pub fn store_document(&self, key: Fingerprint, result: Arc<PipelineResult>) {
        self.documents.insert(key, result);
    }

    pub fn stats(&self) -> ResultCacheStats {
        ResultCacheStats {
            verdicts: self.verdicts.stats(),
            records: self.records.stats(),
            documents: self.documents.stats(),
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(&CacheSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_bounded_per_shard() {
        let cache: ShardedLru<String, usize> = ShardedLru::new(8, 4);
        assert_eq!(cache.capacity(), 8);
        for i in 0..100 {
            cache.insert(format!("key{i}"), i);
        }
        assert!(cache.len() <= 8);
    }

    #[test]
    fn tiny_capacity_still_holds_one_entry_per_shard() {
        let cache: ShardedLru<String, u8> = ShardedLru::new(0, 0);
        cache.insert("a".to_string(), 1);
        assert_eq!(cache.get("a"), Some(1));
    }

    #[test]
    fn hits_and_misses_are_counted() {
        let cache: ShardedLru<String, bool> = ShardedLru::new(4, 1);
        let mut calls = 0;
        assert!(cache.get_or_insert_with("x", || {
            calls += 1;
            true
        }));
        assert!(cache.get_or_insert_with("x", || {
            calls += 1;
            false
        }));
        assert_eq!(calls, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1, entries: 1 });
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let cache: ShardedLru<String, u8> = ShardedLru::new(2, 1);
        cache.insert("a".into(), 1);
        cache.insert("b".into(), 2);
        assert_eq!(cache.get("a"), Some(1));
        cache.insert("c".into(), 3);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
    }

    #[test]
    fn fingerprints_are_content_hashes() {
        assert_eq!(Fingerprint::of_text("abc"), Fingerprint::of_bytes(b"abc"));
        assert_ne!(Fingerprint::of_text("abc"), Fingerprint::of_text("abd"));
        assert_eq!(Fingerprint::of_text("").as_str().len(), 64);
    }
}
