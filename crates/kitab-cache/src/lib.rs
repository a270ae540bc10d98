//! Cache abstraction layer for kitab.
//!
//! This crate provides generic caching traits that decouple the document
//! pipeline from the underlying storage mechanism. Two traits form the core
//! API:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Key-value store with etag-based invalidation and TTL
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`MemoryCache`]: Process-local in-memory implementation
//! - [`FileCache`]: File-based implementation with version validation
//!
//! # Example
//!
//! ```
//! use kitab_cache::{Cache, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let bucket = cache.bucket("docs");
//! bucket.set("en:guide", "1700000000", None, b"<p>hello</p>");
//! assert_eq!(bucket.get("en:guide", "1700000000"), Some(b"<p>hello</p>".to_vec()));
//! ```

mod ext;
mod file;
mod memory;

use std::time::Duration;

pub use ext::CacheBucketExt;
pub use file::FileCache;
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Each bucket stores key-value pairs where values are invalidated by an etag
/// and an optional time-to-live. The etag is an opaque string chosen by the
/// caller (e.g., a file mtime or content hash). A cache hit occurs only when
/// the key exists, the etag matches, and the entry has not expired.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `Some(value)` if the key exists, was stored with the same
    /// `etag`, and its TTL (if any) has not elapsed. Returns `None` otherwise.
    ///
    /// If `etag` is an empty string, etag validation is skipped and any
    /// unexpired entry for the key is returned.
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>>;

    /// Store a value in the cache.
    ///
    /// Overwrites any existing entry for the same key, regardless of the
    /// previous etag. A `ttl` of `None` means the entry never expires on its
    /// own (it is still invalidated by etag mismatch).
    fn set(&self, key: &str, etag: &str, ttl: Option<Duration>, value: &[u8]);

    /// Remove an entry from the cache.
    fn remove(&self, key: &str);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// A `Cache` produces buckets that are logically isolated from each other.
/// For example, a file-based cache stores each bucket in a separate
/// subdirectory.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Calling `bucket` multiple times with the same name may return
    /// independent handles that share the same underlying storage.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str, _etag: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _etag: &str, _ttl: Option<Duration>, _value: &[u8]) {}

    fn remove(&self, _key: &str) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled. All operations are no-ops and all lookups
/// return `None`.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cache_always_misses() {
        let cache = NullCache;
        let bucket = cache.bucket("docs");

        assert_eq!(bucket.get("key", "etag1"), None);

        bucket.set("key", "etag1", None, b"hello");
        assert_eq!(bucket.get("key", "etag1"), None);
    }

    #[test]
    fn test_null_cache_remove_is_noop() {
        let cache = NullCache;
        let bucket = cache.bucket("docs");
        bucket.remove("key");
        assert_eq!(bucket.get("key", ""), None);
    }
}
