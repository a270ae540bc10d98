//! Search index building and cache pre-warming.

use serde::{Deserialize, Serialize};

use kitab_content::{SearchChunk, extract_chunks};

use crate::store::DocumentStore;

/// One record of the serialized search index: a chunk tagged with its locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// The extracted chunk.
    #[serde(flatten)]
    pub chunk: SearchChunk,
    /// Locale of the owning document.
    pub locale: String,
}

/// Outcome of a full-corpus pre-warm run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WarmReport {
    /// Documents rendered (or served from cache) successfully.
    pub built: usize,
    /// Documents that failed and were skipped.
    pub failed: usize,
}

/// Builds the flat, client-side search index over the document corpus.
///
/// Iterates the store's listing per locale and renders through the same
/// cache the request path uses, so an index build doubles as a cache warm-up.
/// A failure on any single document is logged and that document skipped; the
/// batch never aborts.
pub struct IndexBuilder<'a> {
    store: &'a DocumentStore,
}

impl<'a> IndexBuilder<'a> {
    /// Create an index builder over a store.
    #[must_use]
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Build the search index for one locale, or all supported locales when
    /// none is given.
    #[must_use]
    pub fn build_index(&self, locale: Option<&str>) -> Vec<IndexEntry> {
        let locales: Vec<String> = match locale {
            Some(locale) => vec![locale.to_owned()],
            None => self.store.config().supported_locales.clone(),
        };

        let mut index = Vec::new();
        for locale in &locales {
            for slug in self.listing(locale) {
                match self.store.get(locale, &slug) {
                    Ok(doc) => {
                        for chunk in extract_chunks(&doc.html, &slug, &doc.title) {
                            index.push(IndexEntry {
                                chunk,
                                locale: locale.clone(),
                            });
                        }
                    }
                    Err(e) => {
                        tracing::warn!(locale = %locale, slug = %slug, error = %e, "skipping document during index build");
                    }
                }
            }
        }

        index
    }

    /// Render every discovered (locale, slug) pair to populate the cache
    /// ahead of traffic, continuing past individual failures.
    #[must_use]
    pub fn warm(&self) -> WarmReport {
        let mut report = WarmReport::default();

        for locale in self.store.config().supported_locales.clone() {
            for slug in self.listing(&locale) {
                match self.store.get(&locale, &slug) {
                    Ok(_) => report.built += 1,
                    Err(e) => {
                        report.failed += 1;
                        tracing::warn!(locale = %locale, slug = %slug, error = %e, "failed to pre-render document");
                    }
                }
            }
        }

        report
    }

    fn listing(&self, locale: &str) -> Vec<String> {
        match self.store.list(locale) {
            Ok(items) => items.into_iter().map(|item| item.slug).collect(),
            Err(e) => {
                tracing::warn!(locale = %locale, error = %e, "failed to list documents");
                Vec::new()
            }
        }
    }
}
