//! Extension trait for [`CacheBucket`] with typed convenience methods.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Provides `get_json`/`set_json` for serde-serializable types. These are
/// implemented as default methods on an extension trait so that:
///
/// - [`CacheBucket`] stays object-safe with no serde dependency
/// - Implementors only need to handle raw bytes
/// - Callers get ergonomic typed access via a blanket impl
///
/// Any deserialization failure is reported as a cache miss, never an error —
/// a corrupted entry simply triggers regeneration.
///
/// # Example
///
/// ```
/// use kitab_cache::{Cache, CacheBucketExt, MemoryCache};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct PageData { title: String }
///
/// let cache = MemoryCache::new();
/// let bucket = cache.bucket("docs");
///
/// bucket.set_json("page", "v1", None, &PageData { title: "Hello".into() });
/// let data: Option<PageData> = bucket.get_json("page", "v1");
/// assert_eq!(data.unwrap().title, "Hello");
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, etag mismatch, expiry, or
    /// deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str, etag: &str) -> Option<T> {
        let bytes = self.get(key, etag)?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding malformed cache entry");
                None
            }
        }
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, etag: &str, ttl: Option<Duration>, value: &T) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, etag, ttl, &bytes);
        }
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cache, MemoryCache};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        title: String,
        order: i64,
    }

    #[test]
    fn test_json_round_trip() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        let payload = Payload {
            title: "Guide".to_owned(),
            order: 1,
        };
        bucket.set_json("guide", "etag1", None, &payload);

        let read: Option<Payload> = bucket.get_json("guide", "etag1");
        assert_eq!(read, Some(payload));
    }

    #[test]
    fn test_malformed_json_is_a_miss() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("guide", "etag1", None, b"not json at all");

        let read: Option<Payload> = bucket.get_json("guide", "etag1");
        assert_eq!(read, None);
    }

    #[test]
    fn test_wrong_shape_is_a_miss() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        // Valid JSON but missing required fields
        bucket.set("guide", "etag1", None, br#"{"title": "Guide"}"#);

        let read: Option<Payload> = bucket.get_json("guide", "etag1");
        assert_eq!(read, None);
    }
}
