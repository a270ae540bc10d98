//! Error types for the document store.

/// Error returned by document store operations.
///
/// Recoverable conditions (malformed front matter, corrupt cache entries,
/// single-document index failures) never surface here — they are logged and
/// recovered locally. What remains is the caller's problem: a document that
/// doesn't exist, or an environment-level I/O failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No resolvable file for the requested (version, locale, slug).
    #[error("document not found: [{locale}] {slug}")]
    NotFound {
        /// Requested locale.
        locale: String,
        /// Requested slug.
        slug: String,
    },
    /// Filesystem failure outside the pipeline's control.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn not_found(locale: &str, slug: &str) -> Self {
        Self::NotFound {
            locale: locale.to_owned(),
            slug: slug.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("en", "missing/page");
        assert_eq!(err.to_string(), "document not found: [en] missing/page");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
