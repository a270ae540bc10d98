//! In-memory cache implementation.
//!
//! [`MemoryCache`] keeps entries in a process-local map. Buckets returned for
//! the same name share storage, so two handles to the bucket `"docs"` observe
//! each other's writes. Races between concurrent writers are tolerated — the
//! pipeline regenerates identical content deterministically, so the last
//! write wins harmlessly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::{Cache, CacheBucket};

struct Entry {
    etag: String,
    expires_at: Option<Instant>,
    data: Vec<u8>,
}

type BucketMap = Arc<Mutex<HashMap<String, Entry>>>;

/// Process-local in-memory [`Cache`].
#[derive(Default)]
pub struct MemoryCache {
    buckets: Mutex<HashMap<String, BucketMap>>,
}

impl MemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        let mut buckets = self.buckets.lock().expect("cache mutex poisoned");
        let map = buckets.entry(name.to_owned()).or_default();
        Box::new(MemoryCacheBucket {
            entries: Arc::clone(map),
        })
    }
}

/// A single bucket backed by a shared map.
struct MemoryCacheBucket {
    entries: BucketMap,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        let entry = entries.get(key)?;

        if let Some(deadline) = entry.expires_at
            && Instant::now() >= deadline
        {
            return None;
        }

        if !etag.is_empty() && entry.etag != etag {
            return None;
        }

        Some(entry.data.clone())
    }

    fn set(&self, key: &str, etag: &str, ttl: Option<Duration>, value: &[u8]) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            key.to_owned(),
            Entry {
                etag: etag.to_owned(),
                expires_at: ttl.map(|t| Instant::now() + t),
                data: value.to_vec(),
            },
        );
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("guide", "etag1", None, b"<p>content</p>");
        assert_eq!(bucket.get("guide", "etag1"), Some(b"<p>content</p>".to_vec()));
    }

    #[test]
    fn test_etag_mismatch_misses() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("guide", "etag1", None, b"data");
        assert_eq!(bucket.get("guide", "etag2"), None);
    }

    #[test]
    fn test_empty_etag_skips_validation() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("guide", "some-etag", None, b"data");
        assert_eq!(bucket.get("guide", ""), Some(b"data".to_vec()));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("guide", "etag1", Some(Duration::ZERO), b"data");
        assert_eq!(bucket.get("guide", "etag1"), None);
    }

    #[test]
    fn test_long_ttl_survives() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("guide", "etag1", Some(Duration::from_secs(3600)), b"data");
        assert_eq!(bucket.get("guide", "etag1"), Some(b"data".to_vec()));
    }

    #[test]
    fn test_remove() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("guide", "etag1", None, b"data");
        bucket.remove("guide");
        assert_eq!(bucket.get("guide", "etag1"), None);
    }

    #[test]
    fn test_same_name_buckets_share_storage() {
        let cache = MemoryCache::new();
        let a = cache.bucket("docs");
        let b = cache.bucket("docs");

        a.set("key", "etag", None, b"shared");
        assert_eq!(b.get("key", "etag"), Some(b"shared".to_vec()));
    }

    #[test]
    fn test_buckets_are_isolated() {
        let cache = MemoryCache::new();
        let a = cache.bucket("alpha");
        let b = cache.bucket("beta");

        a.set("key", "etag", None, b"alpha-data");
        b.set("key", "etag", None, b"beta-data");

        assert_eq!(a.get("key", "etag"), Some(b"alpha-data".to_vec()));
        assert_eq!(b.get("key", "etag"), Some(b"beta-data".to_vec()));
    }

    #[test]
    fn test_overwrite_replaces_etag() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("key", "etag1", None, b"first");
        bucket.set("key", "etag2", None, b"second");

        assert_eq!(bucket.get("key", "etag1"), None);
        assert_eq!(bucket.get("key", "etag2"), Some(b"second".to_vec()));
    }
}
