//! File-based cache implementation.
//!
//! [`FileCache`] stores cache entries as files on disk, organized into buckets
//! (subdirectories). Each entry is a single file with a binary header followed
//! by the data:
//!
//! ```text
//! [etag_len: u32 LE][etag bytes][expires_at: u64 LE unix secs, 0 = never][data bytes]
//! ```
//!
//! On read, only the header is read first to validate the etag and expiry.
//! The full data is read only on cache hit, avoiding unnecessary I/O on
//! mismatch.
//!
//! On construction, [`FileCache`] validates a `VERSION` file in the cache
//! root. If the version mismatches or is missing, the entire cache directory
//! is wiped and recreated. This ensures stale caches from previous builds are
//! never used.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::{Cache, CacheBucket};

/// File-based [`Cache`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- VERSION            # contains the cache version string
/// +-- docs/              # bucket "docs"
/// |   +-- en:guide       # cache entry
/// +-- index/             # bucket "index"
///     +-- ...
/// ```
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a new file-based cache at `root`, validating the cache version.
    ///
    /// If the `VERSION` file inside `root` does not match `version`, the
    /// entire cache directory is removed and recreated with the new version.
    /// Errors during validation are logged but never fatal.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        validate_version(&root, version);
        Self { root }
    }
}

impl Cache for FileCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(FileCacheBucket {
            dir: self.root.join(name),
        })
    }
}

/// A single bucket backed by a directory on disk.
struct FileCacheBucket {
    dir: PathBuf,
}

impl CacheBucket for FileCacheBucket {
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
        let path = self.dir.join(key);
        let mut file = File::open(&path).ok()?;

        // Read etag length (u32 LE)
        let mut len_buf = [0u8; 4];
        file.read_exact(&mut len_buf).ok()?;
        let etag_len = u32::from_le_bytes(len_buf) as usize;

        // Read stored etag
        let mut stored_etag = vec![0u8; etag_len];
        file.read_exact(&mut stored_etag).ok()?;

        // Read expiry deadline (u64 LE unix seconds, 0 = never)
        let mut expires_buf = [0u8; 8];
        file.read_exact(&mut expires_buf).ok()?;
        let expires_at = u64::from_le_bytes(expires_buf);

        if expires_at != 0 && unix_now() >= expires_at {
            return None;
        }

        // Validate etag (skip if caller passes empty etag)
        if !etag.is_empty() && stored_etag != etag.as_bytes() {
            return None;
        }

        // Etag matches and entry is fresh — read the data
        let mut data = Vec::new();
        file.read_to_end(&mut data).ok()?;
        Some(data)
    }

    fn set(&self, key: &str, etag: &str, ttl: Option<Duration>, value: &[u8]) {
        let path = self.dir.join(key);

        // Silently ignore errors — cache is optional
        let Some(parent) = path.parent() else {
            return;
        };
        if fs::create_dir_all(parent).is_err() {
            return;
        }

        let expires_at = ttl.map_or(0, |t| unix_now().saturating_add(t.as_secs()));

        let etag_bytes = etag.as_bytes();
        let mut buf = Vec::with_capacity(4 + etag_bytes.len() + 8 + value.len());
        buf.extend_from_slice(&u32::try_from(etag_bytes.len()).unwrap_or(0).to_le_bytes());
        buf.extend_from_slice(etag_bytes);
        buf.extend_from_slice(&expires_at.to_le_bytes());
        buf.extend_from_slice(value);

        let _ = fs::write(&path, &buf);
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.dir.join(key));
    }
}

/// Seconds since the Unix epoch.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Validate the cache version, wiping the directory on mismatch.
fn validate_version(root: &Path, version: &str) {
    let version_file = root.join("VERSION");

    match fs::read_to_string(&version_file) {
        Ok(stored) if stored == version => {
            tracing::debug!("cache version matches: {version}");
            return;
        }
        Ok(stored) => {
            tracing::info!(
                "cache version mismatch (stored={stored}, current={version}), wiping cache"
            );
        }
        Err(_) => {
            tracing::info!("no cache VERSION file found, initializing cache");
        }
    }

    if root.exists()
        && let Err(e) = fs::remove_dir_all(root)
    {
        tracing::warn!("failed to remove cache directory: {e}");
    }
    if let Err(e) = fs::create_dir_all(root) {
        tracing::warn!("failed to create cache directory: {e}");
        return;
    }
    if let Err(e) = fs::write(&version_file, version) {
        tracing::warn!("failed to write cache VERSION file: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        bucket.set("en:guide", "etag1", None, b"<p>hello</p>");
        assert_eq!(bucket.get("en:guide", "etag1"), Some(b"<p>hello</p>".to_vec()));
    }

    #[test]
    fn test_etag_mismatch_misses() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        bucket.set("key", "correct-etag", None, b"data");

        assert_eq!(bucket.get("key", "correct-etag"), Some(b"data".to_vec()));
        assert_eq!(bucket.get("key", "wrong-etag"), None);
    }

    #[test]
    fn test_empty_etag_skips_validation() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        bucket.set("key", "some-etag", None, b"data");
        assert_eq!(bucket.get("key", ""), Some(b"data".to_vec()));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        bucket.set("key", "etag1", Some(Duration::ZERO), b"data");
        assert_eq!(bucket.get("key", "etag1"), None);
    }

    #[test]
    fn test_long_ttl_survives() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        bucket.set("key", "etag1", Some(Duration::from_secs(3600)), b"data");
        assert_eq!(bucket.get("key", "etag1"), Some(b"data".to_vec()));
    }

    #[test]
    fn test_get_nonexistent_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        assert_eq!(bucket.get("nonexistent", "etag"), None);
    }

    #[test]
    fn test_overwrite() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        bucket.set("key", "etag1", None, b"first");
        bucket.set("key", "etag2", None, b"second");

        assert_eq!(bucket.get("key", "etag1"), None);
        assert_eq!(bucket.get("key", "etag2"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_remove() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        bucket.set("key", "etag1", None, b"data");
        bucket.remove("key");
        assert_eq!(bucket.get("key", "etag1"), None);
    }

    #[test]
    fn test_buckets_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        let bucket_a = cache.bucket("alpha");
        let bucket_b = cache.bucket("beta");

        bucket_a.set("key", "etag", None, b"alpha-data");
        bucket_b.set("key", "etag", None, b"beta-data");

        assert_eq!(bucket_a.get("key", "etag"), Some(b"alpha-data".to_vec()));
        assert_eq!(bucket_b.get("key", "etag"), Some(b"beta-data".to_vec()));
    }

    #[test]
    fn test_nested_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        bucket.set("guides/setup/intro", "etag1", None, b"nested content");
        assert_eq!(
            bucket.get("guides/setup/intro", "etag1"),
            Some(b"nested content".to_vec())
        );
    }

    #[test]
    fn test_binary_data() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("docs");

        let binary_data: Vec<u8> = vec![0x00, 0x01, 0x0A, 0x0D, 0xFF, 0xFE, 0x80, 0x7F];
        bucket.set("binary", "etag1", None, &binary_data);
        assert_eq!(bucket.get("binary", "etag1"), Some(binary_data));
    }

    #[test]
    fn test_version_match_keeps_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        let bucket = cache.bucket("docs");
        bucket.set("key", "etag1", None, b"preserved");

        let cache2 = FileCache::new(root, "v1");
        let bucket2 = cache2.bucket("docs");
        assert_eq!(bucket2.get("key", "etag1"), Some(b"preserved".to_vec()));
    }

    #[test]
    fn test_version_mismatch_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        let bucket = cache.bucket("docs");
        bucket.set("key", "etag1", None, b"will-be-wiped");

        let cache2 = FileCache::new(root.clone(), "v2");
        let bucket2 = cache2.bucket("docs");
        assert_eq!(bucket2.get("key", "etag1"), None);

        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v2");
    }

    #[test]
    fn test_missing_version_file_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/orphan"), b"stale data").unwrap();

        let cache = FileCache::new(root.clone(), "v1");
        let bucket = cache.bucket("docs");
        assert_eq!(bucket.get("orphan", ""), None);

        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v1");
    }

    #[test]
    fn test_nonexistent_root_creates_version() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("deeply/nested/cache");

        assert!(!root.exists());

        let _cache = FileCache::new(root.clone(), "v1");

        assert!(root.exists());
        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v1");
    }
}
