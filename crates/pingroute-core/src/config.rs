//! Project configuration read from `pingroute.toml`.
//!
//! The file is optional and never written. Every value can also come from a
//! CLI flag or environment variable, which take precedence over the file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [site]
//! base_url = "https://example.com"
//! build_dir = ".next"
//!
//! [indexnow]
//! key = "0f3c9a7d2b6e4f1a8c5d9e7b3a1f6c2d"
//! endpoints = ["https://api.indexnow.org/indexnow"]
//!
//! [google]
//! service_account = "service-account.json"
//!
//! [filter]
//! exclude = ["/drafts/"]
//! ```
//!
//! ```rust
//! use pingroute_core::Config;
//!
//! let config = Config::from_toml_str("[site]\nbase_url = \"https://example.com\"")?;
//! assert_eq!(config.site.base_url.as_deref(), Some("https://example.com"));
//! assert_eq!(config.site.build_dir(), std::path::Path::new(".next"));
//! # Ok::<(), pingroute_core::Error>(())
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::filter::UrlFilter;
use crate::{Error, Result};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pingroute.toml";

/// Build directory used when nothing else is configured.
pub const DEFAULT_BUILD_DIR: &str = ".next";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Site location and build output
    pub site: SiteConfig,
    /// IndexNow settings
    pub indexnow: IndexNowConfig,
    /// Google Indexing API settings
    pub google: GoogleConfig,
    /// URL include/exclude patterns
    pub filter: FilterConfig,
}

/// `[site]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public base URL
    pub base_url: Option<String>,
    /// Framework build directory
    pub build_dir: Option<PathBuf>,
}

impl SiteConfig {
    /// Configured build directory, or [`DEFAULT_BUILD_DIR`].
    pub fn build_dir(&self) -> &Path {
        self.build_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_BUILD_DIR))
    }
}

/// `[indexnow]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexNowConfig {
    /// IndexNow key
    pub key: Option<String>,
    /// Explicit key file URL
    pub key_location: Option<String>,
    /// Endpoints to notify instead of the defaults
    pub endpoints: Option<Vec<String>>,
}

/// `[google]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoogleConfig {
    /// Path to the service-account JSON key file
    pub service_account: Option<PathBuf>,
}

/// `[filter]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Regular expressions a URL must match one of
    pub include: Vec<String>,
    /// Regular expressions that reject a URL
    pub exclude: Vec<String>,
}

impl FilterConfig {
    /// Compile the patterns, or `None` when there are none.
    pub fn to_filter(&self) -> Result<Option<UrlFilter>> {
        if self.include.is_empty() && self.exclude.is_empty() {
            return Ok(None);
        }
        UrlFilter::from_patterns(&self.include, &self.exclude).map(Some)
    }
}

impl Config {
    /// Path to read: the explicit one, or `pingroute.toml` in the working
    /// directory.
    pub fn locate(explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults. Any other read failure or invalid
    /// TOML is an [`Error::Config`].
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loaded configuration from {}", path.display());
                Self::from_toml_str(&content).map_err(|e| {
                    Error::Config(format!("Failed to parse {}: {e}", path.display()))
                })
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            },
            Err(e) => Err(Error::Config(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
