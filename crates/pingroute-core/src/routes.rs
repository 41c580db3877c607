//! Canonical route normalization.
//!
//! Raw route keys come from several build manifests in slightly different
//! shapes (`about`, `/about/`, `/index`, `/blog/[slug]`). This module turns
//! them into one deduplicated set of indexable paths.
//!
//! ## Quick Start
//!
//! ```rust
//! use pingroute_core::routes::{RouteRules, RouteSet};
//!
//! let mut set = RouteSet::new(RouteRules::default());
//! for raw in ["/index", "about/", "/blog/[slug]", "/_error", "/about"] {
//!     set.insert(raw);
//! }
//!
//! assert_eq!(set.into_sorted(), vec!["/", "/about"]);
//! ```
//!
//! ## Exclusion Rules
//!
//! A normalized route is dropped when it:
//!
//! 1. is listed in [`RouteRules`] exclusions (error pages, framework entries)
//! 2. lies under the internal-assets prefix (`/_next`)
//! 3. contains a dynamic-segment marker (`[`, `]` or `:`)

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use tracing::{debug, instrument};

use crate::manifest;

/// The root route.
pub const ROOT_ROUTE: &str = "/";

/// Non-content routes never submitted for indexing.
pub const DEFAULT_EXCLUDED_ROUTES: &[&str] = &[
    "/_app",
    "/_document",
    "/_error",
    "/_middleware",
    "/_not-found",
    "/404",
    "/500",
    "/index",
];

/// Prefix of framework-internal asset routes.
pub const INTERNAL_ASSET_PREFIX: &str = "/_next";

const DYNAMIC_MARKERS: &[char] = &['[', ']', ':'];

/// Immutable exclusion rules applied after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRules {
    excluded: BTreeSet<String>,
    internal_prefix: String,
}

impl Default for RouteRules {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_ROUTES.iter().copied(), INTERNAL_ASSET_PREFIX)
    }
}

impl RouteRules {
    /// Build rules from an explicit exclusion list and asset prefix.
    ///
    /// Exclusions get the same slash handling as routes, so `about/` and
    /// `/about` exclude the same page. `/index` is kept literally and never
    /// excludes the root.
    pub fn new<I, S>(excluded: I, internal_prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded: excluded
                .into_iter()
                .map(|route| normalize_slashes(route.as_ref()))
                .collect(),
            internal_prefix: internal_prefix.into(),
        }
    }

    /// Return a copy of these rules with additional excluded routes.
    #[must_use]
    pub fn with_excluded<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded
            .extend(extra.into_iter().map(|route| normalize_slashes(route.as_ref())));
        self
    }

    /// Whether an already-normalized route must be dropped.
    pub fn rejects(&self, route: &str) -> bool {
        self.excluded.contains(route) || self.is_internal(route) || is_dynamic(route)
    }

    /// Whether `route` is the internal prefix itself or lies beneath it.
    fn is_internal(&self, route: &str) -> bool {
        let prefix = self.internal_prefix.trim_end_matches('/');
        !prefix.is_empty()
            && route
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Excluded routes in sorted order.
    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(String::as_str)
    }
}

/// Normalize one raw route key.
///
/// Adds a leading `/`, strips trailing `/`s (except for the root)
/// and maps `/index` to `/`. Exclusion rules are not applied here.
///
/// ```rust
/// use pingroute_core::routes::normalize_route;
///
/// assert_eq!(normalize_route("about/"), "/about");
/// assert_eq!(normalize_route("/index"), "/");
/// assert_eq!(normalize_route("/"), "/");
/// ```
pub fn normalize_route(raw: &str) -> String {
    let route = normalize_slashes(raw);
    if route == "/index" {
        return ROOT_ROUTE.to_string();
    }
    route
}

/// Leading `/` added, trailing `/`s removed (except for the root).
fn normalize_slashes(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return ROOT_ROUTE.to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Whether a route contains a dynamic-segment marker.
pub fn is_dynamic(route: &str) -> bool {
    route.contains(DYNAMIC_MARKERS)
}

/// Sort routes for display: root first, the rest ascending.
pub fn sort_routes(mut routes: Vec<String>) -> Vec<String> {
    routes.sort_by(|a, b| {
        (a.as_str() != ROOT_ROUTE)
            .cmp(&(b.as_str() != ROOT_ROUTE))
            .then_with(|| a.cmp(b))
    });
    routes
}

/// Deduplicated set of canonical routes.
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    routes: HashSet<String>,
    rules: RouteRules,
}

impl RouteSet {
    /// Create an empty set governed by `rules`.
    pub fn new(rules: RouteRules) -> Self {
        Self {
            routes: HashSet::new(),
            rules,
        }
    }

    /// Normalize and insert a raw key.
    ///
    /// Returns `true` only when the route is indexable and was not already
    /// present. Blank keys are ignored.
    pub fn insert(&mut self, raw: &str) -> bool {
        if raw.trim().is_empty() {
            return false;
        }

        let route = normalize_route(raw);
        if self.rules.rejects(&route) {
            debug!("Skipping non-indexable route {}", route);
            return false;
        }
        self.routes.insert(route)
    }

    /// Whether the set contains a canonical route.
    pub fn contains(&self, route: &str) -> bool {
        self.routes.contains(route)
    }

    /// Number of routes in the set.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Materialize the set as a sorted sequence (root first).
    pub fn into_sorted(self) -> Vec<String> {
        sort_routes(self.routes.into_iter().collect())
    }
}

impl<S: AsRef<str>> Extend<S> for RouteSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for raw in iter {
            self.insert(raw.as_ref());
        }
    }
}

/// Discover the canonical routes of a build directory.
///
/// Reads every optional manifest under `build_dir`, unions their route keys
/// and returns the normalized routes sorted with root first. Missing or
/// unreadable manifests contribute nothing.
#[instrument(skip(rules), fields(build_dir = %build_dir.display()))]
pub async fn discover_routes(build_dir: &Path, rules: &RouteRules) -> Vec<String> {
    let mut set = RouteSet::new(rules.clone());
    for source in manifest::ManifestSource::ALL {
        if let Some(keys) = manifest::read_route_keys(build_dir, source).await {
            debug!("{} contributed {} route keys", source, keys.len());
            set.extend(keys);
        }
    }
    debug!("Discovered {} indexable routes", set.len());
    set.into_sorted()
}
