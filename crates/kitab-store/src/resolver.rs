//! Path resolution between (version, locale, slug) and files on disk.

use std::path::{Path, PathBuf};

/// Maps a (version, locale, slug) triple to a file path and back.
///
/// Resolution is deterministic and falls back in a fixed order: the versioned
/// candidate `root/version/locale/slug.md`, then the unversioned candidate
/// `root/locale/slug.md`. There are no partial matches and no directory
/// listing fallback.
#[derive(Clone, Debug)]
pub struct PathResolver {
    root: PathBuf,
    version: Option<String>,
}

impl PathResolver {
    /// Create a resolver for a content root and optional pinned version.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, version: Option<String>) -> Self {
        Self {
            root: root.into(),
            version,
        }
    }

    /// Resolve a (locale, slug) pair to an existing file path.
    #[must_use]
    pub fn resolve(&self, locale: &str, slug: &str) -> Option<PathBuf> {
        let versioned = self.candidate(self.version.as_deref(), locale, slug);
        if versioned.is_file() {
            return Some(versioned);
        }

        if self.version.is_some() {
            let flat = self.candidate(None, locale, slug);
            if flat.is_file() {
                return Some(flat);
            }
        }

        None
    }

    fn candidate(&self, version: Option<&str>, locale: &str, slug: &str) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(version) = version {
            path.push(version);
        }
        path.push(locale);
        // Append .md unless the slug already carries it; set_extension would
        // clobber dots that are part of the name
        let file = if slug.ends_with(".md") {
            slug.to_owned()
        } else {
            format!("{slug}.md")
        };
        for segment in file.split('/') {
            path.push(segment);
        }
        path
    }

    /// Convert a file path back to a slug.
    ///
    /// Strips the root, a leading version segment (when it names a known
    /// version), the locale segment, and the `.md` extension; separators are
    /// normalized to `/`.
    #[must_use]
    pub fn slug_from_path(&self, path: &Path, known_versions: &[String]) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        let skip = if parts.len() > 2 && known_versions.contains(&parts[0]) {
            2 // version + locale
        } else if parts.len() > 1 {
            1 // locale
        } else {
            0
        };

        let joined = parts[skip..].join("/");
        joined.strip_suffix(".md").unwrap_or(&joined).to_owned()
    }
}
