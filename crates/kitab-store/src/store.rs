//! The document store: resolution, rendering and caching.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::{Duration, SystemTime};

use regex::Regex;
use sha2::{Digest, Sha256};

use kitab_cache::{Cache, CacheBucket, CacheBucketExt};
use kitab_content::{
    doc_url, extract_h1, headline, inject_heading_ids, parse_front_matter, rewrite_images,
    rewrite_links, strip_first_h1,
};
use kitab_renderer::MarkdownEngine;

use crate::config::Config;
use crate::document::{Alternate, Breadcrumb, Document, Listing};
use crate::error::StoreError;
use crate::resolver::PathResolver;
use crate::versions::available_versions;

/// Cache bucket holding rendered documents.
const DOCS_BUCKET: &str = "docs";

static RAW_H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#\s+(.+)$").expect("static pattern"));

/// Orchestrates the content pipeline.
///
/// `get` resolves a (locale, slug) pair, serves a cached record when the
/// source file's mtime still matches, and otherwise runs the full pipeline:
/// front matter → Markdown render → heading IDs and TOC → link rewriting →
/// title resolution → H1 strip → ETag → alternates → cache write.
///
/// The store pins one version (the latest discovered, unless overridden);
/// construct one store per version being served. Locale is an explicit
/// parameter on every call — there is no ambient locale state.
pub struct DocumentStore {
    config: Config,
    version: Option<String>,
    bucket: Box<dyn CacheBucket>,
}

impl DocumentStore {
    /// Create a store pinned to the latest discovered version (or none when
    /// the corpus is unversioned).
    #[must_use]
    pub fn new(config: Config, cache: &dyn Cache) -> Self {
        let version = available_versions(
            &config.root,
            &config.supported_locales,
            &config.exclude_versions,
        )
        .into_iter()
        .next();
        Self::with_version(config, cache, version)
    }

    /// Create a store pinned to an explicit version (`None` for unversioned).
    #[must_use]
    pub fn with_version(config: Config, cache: &dyn Cache, version: Option<String>) -> Self {
        Self {
            config,
            version,
            bucket: cache.bucket(DOCS_BUCKET),
        }
    }

    /// The version this store serves.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The store's configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn resolver(&self) -> PathResolver {
        PathResolver::new(self.config.root.clone(), self.version.clone())
    }

    /// Fetch a document, rendering it on cache miss or staleness.
    pub fn get(&self, locale: &str, slug: &str) -> Result<Document, StoreError> {
        let path = self
            .resolver()
            .resolve(locale, slug)
            .ok_or_else(|| StoreError::not_found(locale, slug))?;

        let mtime = mtime_secs(&path)?;
        let key = cache_key(locale, &path, mtime);
        let etag = mtime.to_string();

        if let Some(doc) = self.bucket.get_json::<Document>(&key, &etag) {
            return Ok(doc);
        }

        let doc = self.generate(&path, locale, slug, mtime)?;
        self.bucket.set_json(
            &key,
            &etag,
            Some(Duration::from_secs(self.config.cache_ttl)),
            &doc,
        );

        Ok(doc)
    }

    fn generate(
        &self,
        path: &Path,
        locale: &str,
        slug: &str,
        mtime: u64,
    ) -> Result<Document, StoreError> {
        let raw = fs::read_to_string(path)?;
        let (front, body) = parse_front_matter(&raw);

        let mut engine = default_engine();
        let rendered = engine.render(body);
        for warning in &rendered.warnings {
            tracing::warn!(path = %path.display(), "{warning}");
        }

        let (html, toc) = inject_heading_ids(&rendered.html);
        let html = rewrite_links(
            &html,
            locale,
            slug,
            self.version.as_deref(),
            &self.config.route_prefix,
        );
        let html = rewrite_images(&html);

        let title = front
            .title
            .or_else(|| extract_h1(&html))
            .unwrap_or_else(|| title_from_path(path));

        // Strip the page title heading so templates don't render it twice
        let html = strip_first_h1(&html);

        let etag = weak_etag(path, mtime, html.len());
        let breadcrumbs = self.breadcrumbs(slug, &title);
        let alternates = self.alternates(locale, slug);

        Ok(Document {
            title,
            html,
            toc,
            breadcrumbs,
            mtime,
            etag,
            alternates,
            locale: locale.to_owned(),
            version: self.version.clone(),
        })
    }

    /// List all documents for a locale, sorted by (order, title).
    ///
    /// Returns an empty list when the locale has no directory. Files whose
    /// name or path contains an excluded fragment are skipped.
    pub fn list(&self, locale: &str) -> Result<Vec<Listing>, StoreError> {
        let Some(dir) = self.locale_dir(locale) else {
            return Ok(Vec::new());
        };

        let mut files = Vec::new();
        collect_markdown_files(&dir, &mut files)?;

        let resolver = self.resolver();
        let known_versions = available_versions(
            &self.config.root,
            &self.config.supported_locales,
            &self.config.exclude_versions,
        );

        let mut items = Vec::new();
        for path in files {
            let rel = path.strip_prefix(&dir).unwrap_or(&path);
            if self.is_excluded(rel) {
                continue;
            }

            // An unreadable file still gets listed under a filename-derived
            // title; the failure surfaces when the document is fetched
            let raw = fs::read_to_string(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "failed to read file for listing");
                String::new()
            });
            let (front, _) = parse_front_matter(&raw);

            let title = front
                .title
                .unwrap_or_else(|| infer_title(&raw, &path));
            let order = front.order.unwrap_or(self.config.default_order);
            let slug = resolver.slug_from_path(&path, &known_versions);
            let mtime = mtime_secs(&path)?;

            items.push(Listing {
                slug,
                title,
                order,
                path,
                mtime,
            });
        }

        items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
        Ok(items)
    }

    /// The directory listed for a locale: versioned when present, otherwise
    /// the unversioned layout.
    fn locale_dir(&self, locale: &str) -> Option<PathBuf> {
        if let Some(version) = &self.version {
            let versioned = self.config.root.join(version).join(locale);
            if versioned.is_dir() {
                return Some(versioned);
            }
        }
        let flat = self.config.root.join(locale);
        flat.is_dir().then_some(flat)
    }

    fn is_excluded(&self, rel: &Path) -> bool {
        let rel_str = rel.to_string_lossy();
        let file_name = rel.file_name().map(|n| n.to_string_lossy());

        self.config.exclude.iter().any(|pattern| {
            file_name.as_deref() == Some(pattern.as_str()) || rel_str.contains(pattern.as_str())
        })
    }

    fn breadcrumbs(&self, slug: &str, title: &str) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            title: self.config.root_label.clone(),
            slug: None,
        }];

        let segments: Vec<&str> = slug.split('/').filter(|s| !s.is_empty()).collect();
        let mut accumulated = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if !accumulated.is_empty() {
                accumulated.push('/');
            }
            accumulated.push_str(segment);

            let is_leaf = i == segments.len() - 1;
            crumbs.push(Breadcrumb {
                title: if is_leaf {
                    title.to_owned()
                } else {
                    headline(segment)
                },
                slug: Some(accumulated.clone()),
            });
        }

        crumbs
    }

    /// Locale alternates: one entry per supported locale whose file resolves
    /// for the same slug.
    fn alternates(&self, active_locale: &str, slug: &str) -> Vec<Alternate> {
        let resolver = self.resolver();
        self.config
            .supported_locales
            .iter()
            .filter(|locale| resolver.resolve(locale, slug).is_some())
            .map(|locale| Alternate {
                locale: locale.clone(),
                label: self.config.locale_label(locale),
                url: doc_url(
                    &self.config.route_prefix,
                    self.version.as_deref(),
                    locale,
                    slug,
                ),
                active: locale == active_locale,
            })
            .collect()
    }
}

fn default_engine() -> MarkdownEngine {
    MarkdownEngine::builder()
        .build()
        .expect("default engine options are valid")
}

fn mtime_secs(path: &Path) -> Result<u64, StoreError> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(modified
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs()))
}

fn cache_key(locale: &str, path: &Path, mtime: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hasher.update(b"|");
    hasher.update(mtime.to_string().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{locale}:{digest}")
}

/// Weak ETag derived from path, mtime and content length.
fn weak_etag(path: &Path, mtime: u64, html_len: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}|{mtime}|{html_len}", path.display()).as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("W/\"{}\"", &digest[..27])
}

/// First ATX H1 in the raw Markdown, else a headline from the filename.
fn infer_title(raw: &str, path: &Path) -> String {
    if let Some(caps) = RAW_H1_RE.captures(raw) {
        return caps[1].trim().to_owned();
    }
    title_from_path(path)
}

fn title_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    headline(&stem)
}

fn collect_markdown_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), StoreError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_markdown_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}
