//! Configuration management.
//!
//! Parses `kitab.toml` with serde, with auto-discovery of the config file in
//! parent directories. Every field has a default, so an absent or empty
//! config file yields a working configuration rooted at `docs/`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "kitab.toml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory of the documentation corpus.
    pub root: PathBuf,
    /// Cache directory; `None` keeps caching in memory only.
    pub cache_dir: Option<PathBuf>,
    /// Cache TTL in seconds for rendered documents.
    pub cache_ttl: u64,
    /// Sort order used when front matter omits `order`.
    pub default_order: i64,
    /// File names or path fragments excluded from listing.
    pub exclude: Vec<String>,
    /// Directory names excluded from version discovery.
    pub exclude_versions: Vec<String>,
    /// Locale codes served by the corpus.
    pub supported_locales: Vec<String>,
    /// Locale used when none is requested.
    pub default_locale: String,
    /// Human-readable labels per locale; falls back to the uppercased code.
    pub locale_labels: BTreeMap<String, String>,
    /// URL prefix used when rewriting document links.
    pub route_prefix: String,
    /// Title of the root breadcrumb.
    pub root_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs"),
            cache_dir: None,
            cache_ttl: 3600,
            default_order: 1000,
            exclude: vec![
                ".DS_Store".to_owned(),
                "README.md".to_owned(),
                "Developers".to_owned(),
            ],
            exclude_versions: vec![".DS_Store".to_owned()],
            supported_locales: vec!["en".to_owned()],
            default_locale: "en".to_owned(),
            locale_labels: BTreeMap::new(),
            route_prefix: "docs".to_owned(),
            root_label: "Documentation".to_owned(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A relative `root` or `cache_dir` is resolved against the config file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.root = resolve_path(base, &config.root);
        config.cache_dir = config.cache_dir.map(|dir| resolve_path(base, &dir));

        Ok(config)
    }

    /// Discover `kitab.toml` by walking up from `start`, returning the loaded
    /// config and its path. Returns `Ok(None)` when no config file exists.
    pub fn discover(start: &Path) -> Result<Option<(Self, PathBuf)>, ConfigError> {
        let mut dir = Some(start);
        while let Some(current) = dir {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, candidate)));
            }
            dir = current.parent();
        }
        Ok(None)
    }

    /// Display label for a locale.
    #[must_use]
    pub fn locale_label(&self, locale: &str) -> String {
        self.locale_labels
            .get(locale)
            .cloned()
            .unwrap_or_else(|| locale.to_uppercase())
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
