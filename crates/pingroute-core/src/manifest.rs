//! Build-manifest readers.
//!
//! A framework build directory may contain several JSON manifests that list
//! routes. Each one is optional and has its own shape, so each gets a small
//! parser that only knows how to pull raw route keys out of its file:
//!
//! | Source | File | Route keys |
//! |--------|------|------------|
//! | [`ManifestSource::StaticRoutes`] | `routes-manifest.json` | `staticRoutes[].page` |
//! | [`ManifestSource::Prerender`] | `prerender-manifest.json` | keys of `routes` |
//! | [`ManifestSource::Pages`] | `server/pages-manifest.json` | top-level keys |
//! | [`ManifestSource::AppPaths`] | `server/app-paths-manifest.json` | top-level keys, converted to URL paths |
//!
//! A missing file is normal (a pages-only build has no app manifest). A file
//! that exists but cannot be parsed is logged and treated as missing.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::{debug, warn};

/// One of the optional manifest files in a build directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestSource {
    /// Static route list from `routes-manifest.json`.
    StaticRoutes,
    /// Prerendered route mapping from `prerender-manifest.json`.
    Prerender,
    /// Server page mapping from `server/pages-manifest.json`.
    Pages,
    /// Server app-route mapping from `server/app-paths-manifest.json`.
    AppPaths,
}

impl ManifestSource {
    /// Every known source, in read order.
    pub const ALL: [Self; 4] = [
        Self::StaticRoutes,
        Self::Prerender,
        Self::Pages,
        Self::AppPaths,
    ];

    /// Path of the manifest relative to the build directory.
    pub const fn relative_path(self) -> &'static str {
        match self {
            Self::StaticRoutes => "routes-manifest.json",
            Self::Prerender => "prerender-manifest.json",
            Self::Pages => "server/pages-manifest.json",
            Self::AppPaths => "server/app-paths-manifest.json",
        }
    }

    fn parse(self, content: &str) -> serde_json::Result<Vec<String>> {
        match self {
            Self::StaticRoutes => {
                let manifest: RoutesManifest = serde_json::from_str(content)?;
                Ok(manifest
                    .static_routes
                    .into_iter()
                    .map(|route| route.page)
                    .collect())
            },
            Self::Prerender => {
                let manifest: PrerenderManifest = serde_json::from_str(content)?;
                Ok(manifest.routes.into_keys().collect())
            },
            Self::Pages => {
                let manifest: BTreeMap<String, IgnoredAny> = serde_json::from_str(content)?;
                Ok(manifest.into_keys().collect())
            },
            Self::AppPaths => {
                let manifest: BTreeMap<String, IgnoredAny> = serde_json::from_str(content)?;
                Ok(manifest
                    .keys()
                    .filter_map(|key| app_path_to_route(key))
                    .collect())
            },
        }
    }
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relative_path())
    }
}

#[derive(Debug, Deserialize)]
struct RoutesManifest {
    #[serde(default, rename = "staticRoutes")]
    static_routes: Vec<StaticRoute>,
}

#[derive(Debug, Deserialize)]
struct StaticRoute {
    page: String,
}

#[derive(Debug, Deserialize)]
struct PrerenderManifest {
    #[serde(default)]
    routes: BTreeMap<String, IgnoredAny>,
}

/// Convert an app-router manifest key into a URL path.
///
/// `/blog/page` becomes `/blog`, `/(marketing)/pricing/page` becomes
/// `/pricing` and `@modal` slots are dropped. Route handlers (`.../route`)
/// do not render pages and yield `None`.
///
/// ```rust
/// use pingroute_core::manifest::app_path_to_route;
///
/// assert_eq!(app_path_to_route("/page").as_deref(), Some("/"));
/// assert_eq!(app_path_to_route("/(shop)/cart/page").as_deref(), Some("/cart"));
/// assert_eq!(app_path_to_route("/sitemap.xml/route"), None);
/// ```
pub fn app_path_to_route(key: &str) -> Option<String> {
    let mut segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();

    match segments.last() {
        Some(&"page") => {
            segments.pop();
        },
        Some(&"route") => return None,
        _ => {},
    }

    let path: Vec<&str> = segments
        .into_iter()
        .filter(|segment| {
            !(segment.starts_with('@') || (segment.starts_with('(') && segment.ends_with(')')))
        })
        .collect();

    Some(format!("/{}", path.join("/")))
}

/// Read the raw route keys of one manifest.
///
/// Returns `None` when the file is absent, unreadable or malformed.
pub async fn read_route_keys(build_dir: &Path, source: ManifestSource) -> Option<Vec<String>> {
    let path = build_dir.join(source.relative_path());

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No {} in {}", source, build_dir.display());
            return None;
        },
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        },
    };

    match source.parse(&content) {
        Ok(keys) => Some(keys),
        Err(e) => {
            warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        },
    }
}
